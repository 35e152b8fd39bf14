//! Extension trait for grouping experiment tables

use crate::Result;
use polars::prelude::*;

/// Grouping and extraction helpers on Polars DataFrames
pub trait UsabilityFrameExt {
    /// Mean of each value column per group
    ///
    /// # Arguments
    /// * `keys` - Grouping columns
    /// * `values` - Numeric columns to average
    ///
    /// # Returns
    /// One row per distinct key combination, sorted ascending by the keys,
    /// with the value columns holding the group means. Rows with a null key
    /// are excluded.
    fn group_means(&self, keys: &[&str], values: &[&str]) -> Result<DataFrame>;

    /// Values of `value_column` on rows where `key_column` equals `key`, in row order
    fn values_where(&self, key_column: &str, key: &str, value_column: &str) -> Result<Vec<f64>>;

    /// Distinct non-null labels of a text column, sorted
    fn distinct_labels(&self, column: &str) -> Result<Vec<String>>;

    /// Text column as owned strings; nulls become empty strings
    fn labels(&self, column: &str) -> Result<Vec<String>>;

    /// Numeric column as f64; nulls become NaN
    fn float_values(&self, column: &str) -> Result<Vec<f64>>;
}
