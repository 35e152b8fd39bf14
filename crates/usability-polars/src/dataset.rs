//! The cleaned, enriched experiment table

use crate::config::LoadOptions;
use crate::{derive, loader, Result, UsabilityFrameExt};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Experiment table after cleaning and derivation
///
/// Holds one row per (wallet, rater) evaluation with the backup labels and
/// task aggregates already attached. It is never modified after
/// construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Read, clean and enrich the workbook or text export at `path`
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let raw = loader::read_frame(path, options)?;
        let dataset = Self::from_frame(raw)?;
        info!(path = %path.display(), rows = dataset.height(), "loaded experiment data");
        Ok(dataset)
    }

    /// Clean and enrich an already-read table
    pub fn from_frame(raw: DataFrame) -> Result<Self> {
        let cleaned = loader::clean(raw)?;
        let frame = derive::enrich(cleaned)?;
        Ok(Self { frame })
    }

    /// The underlying table
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of evaluation rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// See [`UsabilityFrameExt::group_means`]
    pub fn group_means(&self, keys: &[&str], values: &[&str]) -> Result<DataFrame> {
        self.frame.group_means(keys, values)
    }

    /// See [`UsabilityFrameExt::values_where`]
    pub fn values_where(&self, key_column: &str, key: &str, value_column: &str) -> Result<Vec<f64>> {
        self.frame.values_where(key_column, key, value_column)
    }

    /// See [`UsabilityFrameExt::distinct_labels`]
    pub fn distinct_labels(&self, column: &str) -> Result<Vec<String>> {
        self.frame.distinct_labels(column)
    }
}
