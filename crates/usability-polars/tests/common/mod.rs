//! Common test utilities for usability-polars tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::io::Write;
use tempfile::NamedTempFile;

/// Title rows above the header, as in the spreadsheet export
pub const PREAMBLE: &str = "Wallet usability study,,,\nHeuristic evaluation export,,,\n,,,\n";

pub const HEADER: &str =
    "Wallet,Type,Expert,Prompt,Validation,G1,G2,G3,G4,G5,G6,G7,G8,,Unnamed: 14";

/// One evaluation row
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub wallet: &'static str,
    pub kind: &'static str,
    pub expert: bool,
    pub prompt: u8,
    pub validation: u8,
    pub scores: [f64; 8],
}

impl Evaluation {
    pub fn new(wallet: &'static str, kind: &'static str, scores: [f64; 8]) -> Self {
        Self {
            wallet,
            kind,
            expert: false,
            prompt: 0,
            validation: 0,
            scores,
        }
    }

    pub fn prompt(mut self, prompt: u8) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn validation(mut self, validation: u8) -> Self {
        self.validation = validation;
        self
    }

    pub fn expert(mut self) -> Self {
        self.expert = true;
        self
    }

    pub fn to_csv_row(&self) -> String {
        let scores: Vec<String> = self.scores.iter().map(|s| s.to_string()).collect();
        format!(
            "{},{},{},{},{},{},,",
            self.wallet,
            self.kind,
            self.expert,
            self.prompt,
            self.validation,
            scores.join(",")
        )
    }
}

/// Write an export file: preamble, header, rows
pub fn write_export(rows: &[Evaluation]) -> NamedTempFile {
    let body: Vec<String> = rows.iter().map(Evaluation::to_csv_row).collect();
    write_raw(&format!("{PREAMBLE}{HEADER}\n{}\n", body.join("\n")))
}

/// Write arbitrary file contents to a `.csv` file
pub fn write_raw(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Three wallets, two rows each
pub fn three_wallets() -> Vec<Evaluation> {
    vec![
        Evaluation::new("Ledger", "Hardware", [5.0, 4.0, 5.0, 4.0, 5.0, 4.0, 5.0, 4.0]).prompt(1).validation(1).expert(),
        Evaluation::new("Ledger", "Hardware", [4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0]).prompt(1).validation(1),
        Evaluation::new("Exodus", "Software", [3.0, 3.0, 4.0, 2.0, 3.0, 3.0, 4.0, 2.0]).prompt(1),
        Evaluation::new("Exodus", "Software", [2.0, 3.0, 3.0, 3.0, 2.0, 3.0, 3.0, 3.0]).prompt(1),
        Evaluation::new("Coinbase", "Custodial", [2.0, 2.0, 1.0, 2.0, 2.0, 1.0, 2.0, 2.0]),
        Evaluation::new("Coinbase", "Custodial", [1.0, 2.0, 2.0, 2.0, 1.0, 2.0, 2.0, 2.0]).expert(),
    ]
}

/// Columns of the workbook header row; the last one is left blank
pub const WORKBOOK_HEADER: [&str; 14] = [
    "Wallet", "Type", "Expert", "Prompt", "Validation", "G1", "G2", "G3", "G4", "G5", "G6", "G7",
    "G8", "",
];

/// Write a workbook laid out like the study file: two title rows, a blank
/// row, the header on row 4, then one row per evaluation
pub fn write_workbook(rows: &[Evaluation]) -> anyhow::Result<NamedTempFile> {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Wallet usability study")?;
    sheet.write_string(1, 0, "Heuristic evaluation export")?;
    for (col, name) in WORKBOOK_HEADER.iter().enumerate() {
        if !name.is_empty() {
            sheet.write_string(3, col as u16, *name)?;
        }
    }
    for (i, row) in rows.iter().enumerate() {
        let r = 4 + i as u32;
        sheet.write_string(r, 0, row.wallet)?;
        sheet.write_string(r, 1, row.kind)?;
        sheet.write_boolean(r, 2, row.expert)?;
        sheet.write_number(r, 3, row.prompt)?;
        sheet.write_number(r, 4, row.validation)?;
        for (j, score) in row.scores.iter().enumerate() {
            sheet.write_number(r, 5 + j as u16, *score)?;
        }
    }
    // A stray note under the unlabelled column
    sheet.write_string(4, 13, "checked")?;

    workbook.save(file.path())?;
    Ok(file)
}
