//! Levene's test for homogeneity of variances
//!
//! Uses the median-centred (Brown-Forsythe) variant: a one-way ANOVA on the
//! absolute deviations of each observation from its group median.

use crate::traits::{validate_groups, HypothesisTest, KSampleTest};
use crate::{TestKind, TestResult};
use usability_core::math::distributions::fisher;
use usability_core::utils::{mean, median};
use usability_core::{Error, Result};

/// Levene's test, centred on group medians
#[derive(Debug, Clone, Copy, Default)]
pub struct Levene;

impl Levene {
    /// Create a new Levene test
    pub fn new() -> Self {
        Self
    }
}

impl HypothesisTest for Levene {
    fn kind(&self) -> TestKind {
        TestKind::Levene
    }
}

impl KSampleTest for Levene {
    fn test(&self, groups: &[&[f64]]) -> Result<TestResult> {
        validate_groups(groups, 1, TestKind::Levene)?;

        let k = groups.len();
        let total: usize = groups.iter().map(|g| g.len()).sum();
        if total <= k {
            return Err(Error::too_few(k + 1, total));
        }

        let deviations: Vec<Vec<f64>> = groups
            .iter()
            .map(|g| {
                let center = median(g);
                g.iter().map(|v| (v - center).abs()).collect()
            })
            .collect();

        let group_means: Vec<f64> = deviations.iter().map(|z| mean(z)).collect();
        let grand_mean = deviations.iter().flatten().sum::<f64>() / total as f64;

        let between: f64 = deviations
            .iter()
            .zip(&group_means)
            .map(|(z, m)| z.len() as f64 * (m - grand_mean).powi(2))
            .sum();
        let within: f64 = deviations
            .iter()
            .zip(&group_means)
            .map(|(z, m)| z.iter().map(|v| (v - m).powi(2)).sum::<f64>())
            .sum();

        if within <= 0.0 {
            return Err(Error::degenerate(
                "Levene's test",
                "absolute deviations from the median are constant within every group",
            ));
        }

        let df_between = (k - 1) as f64;
        let df_within = (total - k) as f64;
        let w = (df_within / df_between) * between / within;
        let p = fisher::sf(w, df_between, df_within)?;

        Ok(TestResult::new(
            TestKind::Levene,
            w,
            p,
            groups.iter().map(|g| g.len()).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_levene_reference_values() {
        let a = [8.88, 9.12, 9.04, 8.98, 9.00, 9.08, 9.01, 8.85, 9.06, 8.99];
        let b = [8.88, 8.95, 9.29, 9.44, 9.15, 9.58, 8.36, 9.18, 8.67, 9.05];
        let c = [8.95, 9.12, 8.95, 8.85, 9.03, 8.84, 9.07, 8.98, 8.86, 8.98];

        let result = Levene::new().test(&[&a, &b, &c]).unwrap();
        assert_abs_diff_eq!(result.statistic, 7.584952754501659, epsilon = 1e-9);
        assert_abs_diff_eq!(result.p_value, 0.002431505967249684, epsilon = 1e-9);
        assert_eq!(result.sample_sizes, vec![10, 10, 10]);
    }

    #[test]
    fn test_levene_equal_spread_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [11.0, 12.0, 13.0, 14.0];
        let result = Levene::new().test(&[&a, &b]).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_levene_pairs_are_degenerate() {
        // With two observations per group both deviations equal half the range
        let a = [1.0, 2.0];
        let b = [3.0, 5.0];
        let c = [2.0, 2.5];
        let err = Levene::new().test(&[&a, &b, &c]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_levene_requires_two_groups() {
        let a = [1.0, 2.0, 3.0];
        assert!(matches!(
            Levene::new().test(&[&a]).unwrap_err(),
            Error::InvalidInput(_)
        ));
    }

    #[test]
    fn test_levene_empty_group() {
        let a = [1.0, 2.0, 3.0];
        let empty: [f64; 0] = [];
        let err = Levene::new().test(&[&a, &empty]).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
