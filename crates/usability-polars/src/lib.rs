//! Polars data layer for the wallet usability analysis
//!
//! Reads the experiment workbook (or a delimited-text export of it), drops
//! placeholder columns, validates the layout and derives the columns the
//! hypothesis tests work on:
//!
//! - `BackupPrompt` / `BackupProof`: "Yes"/"No" labels of the 0/1 indicators
//! - `TaskTotal`: row sum of the heuristics G1..G8
//! - `TaskMean`: `TaskTotal / 8`
//!
//! # Example
//!
//! ```rust,ignore
//! use usability_polars::{Dataset, LoadOptions, TASK_MEAN, TYPE, WALLET};
//!
//! let data = Dataset::load("DataCollection_Dummy.xlsx", &LoadOptions::default())?;
//! let per_wallet = data.group_means(&[WALLET, TYPE], &[TASK_MEAN])?;
//! ```

mod config;
mod dataset;
mod derive;
mod error;
mod loader;
mod methods;
mod traits;
mod workbook;

pub use config::*;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use loader::{is_placeholder_column, repeated_header};
pub use traits::*;

// Re-export commonly used types from dependencies
pub use polars::prelude::DataFrame;
