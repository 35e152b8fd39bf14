//! One-way analysis of variance

use crate::traits::{validate_groups, HypothesisTest, KSampleTest};
use crate::{TestKind, TestResult};
use usability_core::math::distributions::fisher;
use usability_core::utils::{mean, sum_squared_deviations};
use usability_core::{Error, Result};

/// One-way ANOVA F test
///
/// F = (SSB / (k - 1)) / (SSW / (N - k)), referred to F(k - 1, N - k).
/// Assumes normally distributed groups with equal variances.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneWayAnova;

impl OneWayAnova {
    /// Create a new one-way ANOVA
    pub fn new() -> Self {
        Self
    }
}

impl HypothesisTest for OneWayAnova {
    fn kind(&self) -> TestKind {
        TestKind::OneWayAnova
    }
}

impl KSampleTest for OneWayAnova {
    fn test(&self, groups: &[&[f64]]) -> Result<TestResult> {
        validate_groups(groups, 1, TestKind::OneWayAnova)?;

        let k = groups.len();
        let total: usize = groups.iter().map(|g| g.len()).sum();
        if total <= k {
            return Err(Error::too_few(k + 1, total));
        }

        let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;
        let ss_between: f64 = groups
            .iter()
            .map(|g| g.len() as f64 * (mean(g) - grand_mean).powi(2))
            .sum();
        let ss_within: f64 = groups.iter().map(|g| sum_squared_deviations(g)).sum();

        if ss_within <= 0.0 {
            return Err(Error::degenerate("ANOVA", "within-group variance is zero"));
        }

        let df_between = (k - 1) as f64;
        let df_within = (total - k) as f64;
        let f = (ss_between / df_between) / (ss_within / df_within);
        let p = fisher::sf(f, df_between, df_within)?;

        Ok(TestResult::new(
            TestKind::OneWayAnova,
            f,
            p,
            groups.iter().map(|g| g.len()).collect(),
        ))
    }
}
