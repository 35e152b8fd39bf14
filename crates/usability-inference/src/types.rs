//! Types for hypothesis test results

use serde::Serialize;
use std::fmt;

/// The statistical procedures available in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Shapiro-Wilk normality test
    ShapiroWilk,
    /// Levene's test for equal variances (median-centred)
    Levene,
    /// One-way analysis of variance
    OneWayAnova,
    /// Kruskal-Wallis H test
    KruskalWallis,
    /// Mann-Whitney U rank-sum test
    MannWhitneyU,
}

impl TestKind {
    /// Get the display name of the test
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShapiroWilk => "Shapiro-Wilk",
            Self::Levene => "Levene's test",
            Self::OneWayAnova => "ANOVA",
            Self::KruskalWallis => "Kruskal-Wallis",
            Self::MannWhitneyU => "Mann-Whitney U",
        }
    }

    /// Conventional symbol of the test statistic
    pub fn statistic_symbol(&self) -> &'static str {
        match self {
            Self::ShapiroWilk => "W",
            Self::Levene => "W",
            Self::OneWayAnova => "F",
            Self::KruskalWallis => "H",
            Self::MannWhitneyU => "U",
        }
    }

    /// Whether the test assumes normally distributed groups
    pub fn is_parametric(&self) -> bool {
        matches!(self, Self::OneWayAnova)
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of the alternative hypothesis for two-sample tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// Distributions differ in either direction
    #[default]
    TwoSided,
    /// The first sample is stochastically smaller
    Less,
    /// The first sample is stochastically greater
    Greater,
}

/// Outcome of a single hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// Which test produced the result
    pub test: TestKind,
    /// Value of the test statistic
    pub statistic: f64,
    /// p-value, clamped to [0, 1]
    pub p_value: f64,
    /// Number of observations in each group, in input order
    pub sample_sizes: Vec<usize>,
}

impl TestResult {
    /// Create a new result, clamping the p-value into [0, 1]
    pub fn new(test: TestKind, statistic: f64, p_value: f64, sample_sizes: Vec<usize>) -> Self {
        Self {
            test,
            statistic,
            p_value: p_value.clamp(0.0, 1.0),
            sample_sizes,
        }
    }

    /// Whether the null hypothesis is rejected at level `alpha` (strictly p < alpha)
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Total number of observations across groups
    pub fn total_observations(&self) -> usize {
        self.sample_sizes.iter().sum()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}={:.3}, p={:.4}",
            self.test.name(),
            self.test.statistic_symbol(),
            self.statistic,
            self.p_value
        )
    }
}
