//! Core traits for hypothesis tests
//!
//! Tests are small configuration values; the data is passed per call so a
//! single instance can be reused across groups.

use crate::{TestKind, TestResult};
use usability_core::{Error, Result};

/// Properties shared by every test
pub trait HypothesisTest {
    /// Which procedure this is
    fn kind(&self) -> TestKind;

    /// Smallest group size the test can be evaluated on
    fn min_group_size(&self) -> usize {
        1
    }
}

/// Tests on a single sample (e.g. normality)
pub trait OneSampleTest: HypothesisTest {
    /// Run the test on one sample
    fn test(&self, sample: &[f64]) -> Result<TestResult>;
}

/// Tests comparing two independent samples
pub trait TwoSampleTest: HypothesisTest {
    /// Run the test on two samples; `x` is the reference sample for the statistic
    fn test(&self, x: &[f64], y: &[f64]) -> Result<TestResult>;
}

/// Tests comparing two or more independent groups
pub trait KSampleTest: HypothesisTest {
    /// Run the test across all groups
    fn test(&self, groups: &[&[f64]]) -> Result<TestResult>;
}

/// Validate the group layout shared by the k-sample tests
///
/// Requires at least two groups, every group holding at least `min_size`
/// finite observations.
pub(crate) fn validate_groups(groups: &[&[f64]], min_size: usize, test: TestKind) -> Result<()> {
    if groups.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "{} requires at least 2 groups, got {}",
            test.name(),
            groups.len()
        )));
    }
    for (i, group) in groups.iter().enumerate() {
        if group.len() < min_size {
            return Err(Error::too_few(min_size, group.len()));
        }
        usability_core::utils::ensure_finite(group, &format!("{} group {}", test.name(), i + 1))?;
    }
    Ok(())
}
