//! Column layout and loading options

use std::path::Path;

/// Wallet identifier
pub const WALLET: &str = "Wallet";
/// Wallet type (Hardware / Software / Custodial)
pub const TYPE: &str = "Type";
/// Rater group
pub const EXPERT: &str = "Expert";
/// Binary indicator: the wallet prompted for a backup
pub const PROMPT: &str = "Prompt";
/// Binary indicator: the wallet validated the backup
pub const VALIDATION: &str = "Validation";

/// The eight heuristic score columns
pub const HEURISTICS: [&str; 8] = ["G1", "G2", "G3", "G4", "G5", "G6", "G7", "G8"];

/// Label derived from `Prompt`
pub const BACKUP_PROMPT: &str = "BackupPrompt";
/// Label derived from `Validation`
pub const BACKUP_PROOF: &str = "BackupProof";
/// Row-wise sum of the heuristics
pub const TASK_TOTAL: &str = "TaskTotal";
/// Row-wise mean of the heuristics
pub const TASK_MEAN: &str = "TaskMean";

/// Labels for the binary indicator values 1 and 0
pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Every column the analysis needs, in spreadsheet order
pub const REQUIRED_COLUMNS: [&str; 13] = [
    WALLET, TYPE, EXPERT, PROMPT, VALIDATION, "G1", "G2", "G3", "G4", "G5", "G6", "G7", "G8",
];

/// Rows preceding the header row in the spreadsheet
pub const DEFAULT_HEADER_OFFSET: usize = 3;

/// File format of the experiment data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Decide from the file extension
    #[default]
    Auto,
    /// Excel or OpenDocument workbook (xlsx, xlsm, xlsb, xls, ods)
    Spreadsheet,
    /// Delimited text export
    Csv,
}

impl InputFormat {
    /// Resolve [`InputFormat::Auto`] for `path`
    ///
    /// `.csv` and `.txt` files are read as delimited text; anything else is
    /// opened as a workbook.
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => {
                let extension = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(str::to_ascii_lowercase);
                match extension.as_deref() {
                    Some("csv" | "txt") => Self::Csv,
                    _ => Self::Spreadsheet,
                }
            }
            format => format,
        }
    }
}

/// Options for reading the experiment data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Number of rows to skip before the header row
    pub header_offset: usize,
    /// File format, detected from the extension by default
    pub format: InputFormat,
    /// Worksheet to read; the first one when unset
    pub sheet: Option<String>,
    /// Field separator for delimited text
    pub separator: u8,
}

impl LoadOptions {
    /// Set the number of rows preceding the header
    pub fn with_header_offset(mut self, header_offset: usize) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Read the named worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            format: InputFormat::Auto,
            sheet: None,
            separator: b',',
        }
    }
}
