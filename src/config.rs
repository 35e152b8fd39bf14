//! Analysis configuration

use std::path::PathBuf;
use usability_core::{Error, Result};
use usability_polars::LoadOptions;

/// Default workbook read by the binary
pub const DEFAULT_INPUT: &str = "DataCollection_Dummy.xlsx";

/// Significance level used for every verdict and assumption check
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Experiment workbook to read
    pub input: PathBuf,
    /// How the export is parsed
    pub load: LoadOptions,
    /// Threshold for verdicts and assumption checks
    pub significance: f64,
    /// Minimum per-type group size for the normality check
    pub normality_min_group: usize,
    /// Minimum per-type group size for the variance check
    pub homogeneity_min_group: usize,
}

impl AnalysisConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    pub fn with_normality_min_group(mut self, size: usize) -> Self {
        self.normality_min_group = size;
        self
    }

    pub fn with_homogeneity_min_group(mut self, size: usize) -> Self {
        self.homogeneity_min_group = size;
        self
    }

    /// Check the settings before any data is touched
    pub fn validate(&self) -> Result<()> {
        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "significance level must be in (0, 1), got {}",
                self.significance
            )));
        }
        // Shapiro-Wilk is undefined below 3 observations
        if self.normality_min_group < 3 {
            return Err(Error::InvalidParameter(format!(
                "normality check needs groups of at least 3, got {}",
                self.normality_min_group
            )));
        }
        if self.homogeneity_min_group < 2 {
            return Err(Error::InvalidParameter(format!(
                "variance check needs groups of at least 2, got {}",
                self.homogeneity_min_group
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            load: LoadOptions::default(),
            significance: DEFAULT_SIGNIFICANCE,
            normality_min_group: 3,
            homogeneity_min_group: 2,
        }
    }
}
