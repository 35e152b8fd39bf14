//! Kruskal-Wallis H test
//!
//! Rank-based analogue of one-way ANOVA. All observations are ranked
//! together (ties get their average rank), the statistic is corrected for
//! ties and referred to a χ² distribution with k - 1 degrees of freedom.

use crate::traits::{validate_groups, HypothesisTest, KSampleTest};
use crate::{TestKind, TestResult};
use usability_core::math::distributions::chi_squared;
use usability_core::utils::{average_ranks, tie_term};
use usability_core::{Error, Result};

/// Kruskal-Wallis H test for k independent samples
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalWallis;

impl KruskalWallis {
    /// Create a new Kruskal-Wallis test
    pub fn new() -> Self {
        Self
    }
}

impl HypothesisTest for KruskalWallis {
    fn kind(&self) -> TestKind {
        TestKind::KruskalWallis
    }
}

impl KSampleTest for KruskalWallis {
    fn test(&self, groups: &[&[f64]]) -> Result<TestResult> {
        validate_groups(groups, 1, TestKind::KruskalWallis)?;

        let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
        let n = pooled.len() as f64;
        let ranks = average_ranks(&pooled);

        let mut offset = 0;
        let mut weighted = 0.0;
        for group in groups {
            let rank_sum: f64 = ranks[offset..offset + group.len()].iter().sum();
            weighted += rank_sum * rank_sum / group.len() as f64;
            offset += group.len();
        }

        let correction = 1.0 - tie_term(&pooled) / (n * n * n - n);
        if correction <= 0.0 {
            return Err(Error::degenerate("Kruskal-Wallis", "all numbers are identical"));
        }

        let h = (12.0 / (n * (n + 1.0)) * weighted - 3.0 * (n + 1.0)) / correction;
        let p = chi_squared::sf(h, (groups.len() - 1) as f64)?;

        Ok(TestResult::new(
            TestKind::KruskalWallis,
            h,
            p,
            groups.iter().map(|g| g.len()).collect(),
        ))
    }
}
