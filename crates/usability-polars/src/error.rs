//! Error types for usability-polars

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Statistics error: {0}")]
    Core(#[from] usability_core::Error),
}

impl Error {
    /// Whether the input did not match the expected table layout
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumns(_) | Self::Schema(_) | Self::TypeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
