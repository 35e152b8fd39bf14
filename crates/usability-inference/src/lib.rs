//! Hypothesis tests for the wallet usability analysis
//!
//! This crate provides the statistical procedures the analysis chooses
//! between: assumption checks (normality, equal variances) and the group
//! comparisons they gate.
//!
//! # Supported Tests
//!
//! ## Assumption checks:
//! - **Shapiro-Wilk**: normality of a single sample
//! - **Levene** (median-centred): equality of variances across groups
//!
//! ## Group comparisons:
//! - **One-way ANOVA**: parametric k-sample comparison of means
//! - **Kruskal-Wallis H**: rank-based k-sample comparison
//! - **Mann-Whitney U**: rank-based two-sample comparison
//!
//! Every procedure is deterministic and returns a [`TestResult`]; invalid or
//! too-small input is reported through [`usability_core::Error`] rather than
//! NaN results.
//!
//! # Examples
//!
//! ```rust
//! use usability_inference::{KSampleTest, KruskalWallis, MannWhitneyU, TwoSampleTest};
//!
//! let hardware = [3.9, 4.1, 4.4];
//! let software = [3.1, 3.5, 3.3];
//! let custodial = [2.8, 3.0, 2.6];
//!
//! let h = KruskalWallis::new().test(&[&hardware, &software, &custodial]).unwrap();
//! assert!(h.p_value < 0.05);
//!
//! let u = MannWhitneyU::new().test(&hardware, &custodial).unwrap();
//! assert_eq!(u.statistic, 9.0);
//! ```

mod anova;
mod kruskal_wallis;
mod levene;
mod mann_whitney;
mod shapiro_wilk;
mod traits;
mod types;

// Re-exports
pub use anova::OneWayAnova;
pub use kruskal_wallis::KruskalWallis;
pub use levene::Levene;
pub use mann_whitney::{MannWhitneyMethod, MannWhitneyU};
pub use shapiro_wilk::ShapiroWilk;
pub use traits::{HypothesisTest, KSampleTest, OneSampleTest, TwoSampleTest};
pub use types::{Alternative, TestKind, TestResult};

