//! Mann-Whitney U rank-sum test
//!
//! The statistic reported is U of the first sample,
//! U₁ = R₁ - n₁(n₁ + 1)/2, where R₁ is the sum of the first sample's ranks
//! in the pooled data.
//!
//! Two ways of computing the p-value are available:
//! - **Exact**: the permutation distribution of U, valid without ties
//! - **Asymptotic**: normal approximation with tie and continuity correction
//!
//! [`MannWhitneyMethod::Auto`] picks the exact distribution when one of the
//! samples has at most 8 observations and there are no ties.

use crate::traits::{HypothesisTest, TwoSampleTest};
use crate::{Alternative, TestKind, TestResult};
use serde::Serialize;
use usability_core::math::distributions::normal;
use usability_core::utils::{average_ranks, ensure_finite, tie_term};
use usability_core::{Error, Result};

const EXACT_MAX_SIZE: usize = 8;

/// How the p-value is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MannWhitneyMethod {
    /// Exact for small untied samples, asymptotic otherwise
    #[default]
    Auto,
    /// Permutation distribution of U
    Exact,
    /// Normal approximation with tie and continuity correction
    Asymptotic,
}

/// Mann-Whitney U test for two independent samples
#[derive(Debug, Clone, Copy, Default)]
pub struct MannWhitneyU {
    alternative: Alternative,
    method: MannWhitneyMethod,
}

impl MannWhitneyU {
    /// Create a two-sided test with automatic method selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alternative hypothesis
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Force a p-value method
    pub fn with_method(mut self, method: MannWhitneyMethod) -> Self {
        self.method = method;
        self
    }

    /// The method that will be used for samples of these sizes
    pub fn resolve_method(&self, n1: usize, n2: usize, has_ties: bool) -> MannWhitneyMethod {
        match self.method {
            MannWhitneyMethod::Auto => {
                if n1.min(n2) <= EXACT_MAX_SIZE && !has_ties {
                    MannWhitneyMethod::Exact
                } else {
                    MannWhitneyMethod::Asymptotic
                }
            }
            forced => forced,
        }
    }
}

impl HypothesisTest for MannWhitneyU {
    fn kind(&self) -> TestKind {
        TestKind::MannWhitneyU
    }
}

impl TwoSampleTest for MannWhitneyU {
    fn test(&self, x: &[f64], y: &[f64]) -> Result<TestResult> {
        if x.is_empty() || y.is_empty() {
            return Err(Error::empty_input());
        }
        ensure_finite(x, "Mann-Whitney first sample")?;
        ensure_finite(y, "Mann-Whitney second sample")?;

        let (n1, n2) = (x.len(), y.len());
        let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
        let ranks = average_ranks(&pooled);
        let r1: f64 = ranks[..n1].iter().sum();

        let n1f = n1 as f64;
        let n2f = n2 as f64;
        let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
        let u2 = n1f * n2f - u1;

        let (u, factor) = match self.alternative {
            Alternative::TwoSided => (u1.max(u2), 2.0),
            Alternative::Greater => (u1, 1.0),
            Alternative::Less => (u2, 1.0),
        };

        let ties = tie_term(&pooled);
        let p = match self.resolve_method(n1, n2, ties > 0.0) {
            MannWhitneyMethod::Exact => {
                if ties > 0.0 {
                    return Err(Error::InvalidInput(
                        "exact Mann-Whitney distribution requires untied data".to_string(),
                    ));
                }
                exact_sf(u, n1, n2)? * factor
            }
            _ => {
                let n = n1f + n2f;
                let mu = n1f * n2f / 2.0;
                let variance = n1f * n2f / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)));
                if !(variance > 0.0) {
                    return Err(Error::degenerate(
                        "Mann-Whitney U",
                        "all observations are tied",
                    ));
                }
                let z = (u - mu - 0.5) / variance.sqrt();
                normal::sf(z) * factor
            }
        };

        Ok(TestResult::new(TestKind::MannWhitneyU, u1, p, vec![n1, n2]))
    }
}

/// P(U ≥ u) under the null for sample sizes n1 and n2
///
/// The counts of U are the coefficients of the Gaussian binomial
/// [n1 + n2 choose n1]_q, built as Π (1 - q^(n+i)) / (1 - q^i) over the
/// smaller sample size. Counts are exact integers; sizes whose count total
/// does not fit in an `i128` are rejected.
fn exact_sf(u: f64, n1: usize, n2: usize) -> Result<f64> {
    let overflow = || {
        Error::InvalidInput(format!(
            "exact Mann-Whitney distribution is too large for sample sizes {n1} and {n2}; \
             use the asymptotic method"
        ))
    };

    let (m, n) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };
    let len = m * n + 1;
    let mut counts = vec![0i128; len];
    counts[0] = 1;

    for i in 1..=m {
        let shift = n + i;
        for k in (shift..len).rev() {
            counts[k] = counts[k].checked_sub(counts[k - shift]).ok_or_else(overflow)?;
        }
        for k in i..len {
            counts[k] = counts[k].checked_add(counts[k - i]).ok_or_else(overflow)?;
        }
    }

    let sum = |values: &[i128]| {
        values
            .iter()
            .try_fold(0i128, |acc, c| acc.checked_add(*c))
            .ok_or_else(overflow)
    };
    let total = sum(&counts)?;
    let start = (u.ceil().max(0.0) as usize).min(len);
    let upper = sum(&counts[start..])?;
    Ok(upper as f64 / total as f64)
}
