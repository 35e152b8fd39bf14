//! Common test utilities for the analysis pipeline tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::io::Write;
use tempfile::NamedTempFile;
use wallet_usability::{AnalysisConfig, AnalysisReport, Dataset, LoadOptions, run_analysis};

pub const PREAMBLE: &str = "Wallet usability study,,,\nHeuristic evaluation export,,,\n,,,\n";
pub const HEADER: &str = "Wallet,Type,Expert,Prompt,Validation,G1,G2,G3,G4,G5,G6,G7,G8,";

/// One evaluation row of the export
#[derive(Debug, Clone)]
pub struct Row {
    pub wallet: &'static str,
    pub kind: &'static str,
    pub expert: bool,
    pub prompt: u8,
    pub validation: u8,
    pub scores: [u8; 8],
}

pub fn row(
    wallet: &'static str,
    kind: &'static str,
    expert: bool,
    prompt: u8,
    validation: u8,
    scores: [u8; 8],
) -> Row {
    Row {
        wallet,
        kind,
        expert,
        prompt,
        validation,
        scores,
    }
}

impl Row {
    fn to_csv(&self) -> String {
        let scores: Vec<String> = self.scores.iter().map(u8::to_string).collect();
        format!(
            "{},{},{},{},{},{},",
            self.wallet,
            self.kind,
            self.expert,
            self.prompt,
            self.validation,
            scores.join(",")
        )
    }
}

/// Nine wallets, three per type, rated by an expert and a novice each
pub fn balanced_study() -> Vec<Row> {
    vec![
        row("Ledger", "Hardware", true, 1, 1, [5, 4, 5, 4, 4, 4, 4, 4]),
        row("Ledger", "Hardware", false, 1, 1, [4, 4, 4, 4, 5, 4, 4, 4]),
        row("Trezor", "Hardware", true, 1, 1, [5, 5, 4, 4, 4, 4, 5, 4]),
        row("Trezor", "Hardware", false, 1, 0, [4, 4, 4, 5, 4, 4, 4, 4]),
        row("Keystone", "Hardware", true, 1, 1, [4, 4, 4, 4, 4, 4, 3, 4]),
        row("Keystone", "Hardware", false, 1, 1, [4, 3, 4, 4, 5, 4, 4, 3]),
        row("Exodus", "Software", true, 1, 0, [4, 3, 3, 3, 4, 3, 3, 3]),
        row("Exodus", "Software", false, 1, 0, [3, 3, 3, 3, 3, 4, 3, 3]),
        row("Electrum", "Software", true, 0, 0, [3, 3, 4, 3, 3, 3, 3, 2]),
        row("Electrum", "Software", false, 0, 0, [3, 2, 3, 3, 3, 3, 4, 3]),
        row("Sparrow", "Software", true, 1, 1, [4, 4, 3, 4, 4, 3, 3, 3]),
        row("Sparrow", "Software", false, 1, 1, [3, 3, 4, 3, 4, 4, 3, 4]),
        row("Coinbase", "Custodial", true, 0, 0, [2, 2, 2, 3, 2, 2, 2, 2]),
        row("Coinbase", "Custodial", false, 0, 0, [2, 3, 2, 2, 1, 2, 2, 2]),
        row("Binance", "Custodial", true, 0, 0, [2, 2, 3, 2, 2, 3, 2, 2]),
        row("Binance", "Custodial", false, 0, 0, [3, 2, 2, 2, 2, 2, 2, 3]),
        row("Kraken", "Custodial", true, 0, 0, [1, 2, 2, 2, 2, 2, 3, 2]),
        row("Kraken", "Custodial", false, 0, 0, [2, 2, 2, 2, 2, 1, 2, 2]),
    ]
}

/// Write a delimited-text export with the three title rows above the header
pub fn write_export(rows: &[Row]) -> NamedTempFile {
    let body: Vec<String> = rows.iter().map(Row::to_csv).collect();
    write_raw(&format!("{PREAMBLE}{HEADER}\n{}\n", body.join("\n")))
}

pub fn write_raw(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write the study workbook: header on row 4 after two title rows and a
/// blank row
pub fn write_workbook(rows: &[Row]) -> anyhow::Result<NamedTempFile> {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Wallet usability study")?;
    sheet.write_string(1, 0, "Heuristic evaluation export")?;
    for (col, name) in HEADER.split(',').filter(|n| !n.is_empty()).enumerate() {
        sheet.write_string(3, col as u16, name)?;
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

    workbook.save(file.path())?;
    Ok(file)
}

/// Load `rows` through a temporary export and run every analysis
pub fn analyse(rows: &[Row]) -> AnalysisReport {
    let file = write_export(rows);
    let config = AnalysisConfig::new(file.path());
    let data = Dataset::load(file.path(), &LoadOptions::default()).unwrap();
    run_analysis(&data, &config).unwrap()
}
