//! H2: task scores by wallet type
//!
//! The comparison is chosen from the data: one-way ANOVA when every type
//! group looks normal and the variances look equal, Kruskal-Wallis
//! otherwise. Both assumption checks need minimum group sizes; a check that
//! cannot run leaves the parametric route closed.

use super::{Hypothesis, HypothesisResult};
use crate::config::AnalysisConfig;
use serde::Serialize;
use tracing::{info, warn};
use usability_core::Error;
use usability_inference::{
    HypothesisTest, KSampleTest, KruskalWallis, Levene, OneSampleTest, OneWayAnova, ShapiroWilk,
    TestKind,
};
use usability_polars::{Dataset, Result, UsabilityFrameExt, TASK_MEAN, TYPE, WALLET};

/// The wallet types compared, in report order
pub const WALLET_TYPES: [&str; 3] = ["Hardware", "Software", "Custodial"];

pub const NORMALITY_NOTICE: &str = "Not enough data for normality test.";
pub const HOMOGENEITY_NOTICE: &str = "Not enough data for Levene's test.";

/// p-value of a check on one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPValue {
    pub group: String,
    pub p_value: f64,
}

/// Result of an assumption check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssumptionCheck {
    /// Every p-value exceeded the significance level
    Passed { p_values: Vec<GroupPValue> },
    /// At least one p-value did not
    Rejected { p_values: Vec<GroupPValue> },
    /// Groups too small to run the check
    NotTested { notice: String },
    /// The check could not be evaluated on this input
    Failed {
        test: TestKind,
        group: String,
        message: String,
    },
}

impl AssumptionCheck {
    fn from_p_values(p_values: Vec<GroupPValue>, significance: f64) -> Self {
        if p_values.iter().all(|g| g.p_value > significance) {
            Self::Passed { p_values }
        } else {
            Self::Rejected { p_values }
        }
    }

    fn failed(test: TestKind, group: &str, err: &Error) -> Self {
        warn!(%test, group, error = %err, "assumption check failed");
        Self::Failed {
            test,
            group: group.to_string(),
            message: err.to_string(),
        }
    }

    /// The assumption was checked and holds
    pub fn holds(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    pub fn was_tested(&self) -> bool {
        !matches!(self, Self::NotTested { .. })
    }
}

/// Which comparison the assumption checks allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSelection {
    /// At least one check could not run
    InsufficientData,
    /// Both checks ran and passed
    ParametricEligible,
    /// A check ran and did not pass
    NonParametricRequired,
}

impl TestSelection {
    pub fn from_checks(normality: &AssumptionCheck, homogeneity: &AssumptionCheck) -> Self {
        if !normality.was_tested() || !homogeneity.was_tested() {
            Self::InsufficientData
        } else if normality.holds() && homogeneity.holds() {
            Self::ParametricEligible
        } else {
            Self::NonParametricRequired
        }
    }

    /// ANOVA only when eligible, Kruskal-Wallis otherwise
    pub fn test(&self) -> TestKind {
        match self {
            Self::ParametricEligible => TestKind::OneWayAnova,
            Self::InsufficientData | Self::NonParametricRequired => TestKind::KruskalWallis,
        }
    }
}

/// Full H2 record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletTypeComparison {
    /// Number of wallets per type, in [`WALLET_TYPES`] order
    pub group_sizes: Vec<usize>,
    pub normality: AssumptionCheck,
    pub homogeneity: AssumptionCheck,
    pub selection: TestSelection,
    pub result: HypothesisResult,
}

/// Compare per-wallet TaskMean across the wallet types
pub fn compare_wallet_types(data: &Dataset, config: &AnalysisConfig) -> Result<WalletTypeComparison> {
    let per_wallet = data.group_means(&[WALLET, TYPE], &[TASK_MEAN])?;

    let unknown: Vec<String> = data
        .distinct_labels(TYPE)?
        .into_iter()
        .filter(|t| !WALLET_TYPES.contains(&t.as_str()))
        .collect();
    if !unknown.is_empty() {
        warn!(?unknown, "rows with an unrecognised wallet type are not compared");
    }

    let groups = WALLET_TYPES
        .iter()
        .map(|t| per_wallet.values_where(TYPE, t, TASK_MEAN))
        .collect::<Result<Vec<Vec<f64>>>>()?;
    let samples: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();

    let normality = check_normality(&samples, config);
    let homogeneity = check_homogeneity(&samples, config);
    let selection = TestSelection::from_checks(&normality, &homogeneity);
    let test = selection.test();
    info!(?selection, %test, "selected wallet-type comparison");

    let outcome = match test {
        TestKind::OneWayAnova => OneWayAnova::new().test(&samples),
        _ => KruskalWallis::new().test(&samples),
    };
    let result = HypothesisResult::evaluate(
        Hypothesis::H2,
        "TaskMean by Type",
        test,
        &WALLET_TYPES.join(", "),
        outcome,
        config.significance,
    );

    Ok(WalletTypeComparison {
        group_sizes: groups.iter().map(Vec::len).collect(),
        normality,
        homogeneity,
        selection,
        result,
    })
}

fn check_normality(samples: &[&[f64]], config: &AnalysisConfig) -> AssumptionCheck {
    let shapiro = ShapiroWilk::new();
    let min = config.normality_min_group.max(shapiro.min_group_size());
    if samples.iter().any(|s| s.len() < min) {
        info!(min, "skipping normality check");
        return AssumptionCheck::NotTested {
            notice: NORMALITY_NOTICE.to_string(),
        };
    }

    let mut p_values = Vec::with_capacity(samples.len());
    for (group, sample) in WALLET_TYPES.iter().zip(samples) {
        match shapiro.test(sample) {
            Ok(result) => p_values.push(GroupPValue {
                group: group.to_string(),
                p_value: result.p_value,
            }),
            Err(err) if err.is_insufficient_data() => {
                return AssumptionCheck::NotTested {
                    notice: NORMALITY_NOTICE.to_string(),
                }
            }
            Err(err) => return AssumptionCheck::failed(shapiro.kind(), group, &err),
        }
    }
    AssumptionCheck::from_p_values(p_values, config.significance)
}

fn check_homogeneity(samples: &[&[f64]], config: &AnalysisConfig) -> AssumptionCheck {
    let levene = Levene::new();
    let min = config.homogeneity_min_group.max(levene.min_group_size());
    if samples.iter().any(|s| s.len() < min) {
        info!(min, "skipping variance check");
        return AssumptionCheck::NotTested {
            notice: HOMOGENEITY_NOTICE.to_string(),
        };
    }

    match levene.test(samples) {
        Ok(result) => AssumptionCheck::from_p_values(
            vec![GroupPValue {
                group: WALLET_TYPES.join(", "),
                p_value: result.p_value,
            }],
            config.significance,
        ),
        Err(err) if err.is_insufficient_data() => AssumptionCheck::NotTested {
            notice: HOMOGENEITY_NOTICE.to_string(),
        },
        Err(err) => AssumptionCheck::failed(levene.kind(), &WALLET_TYPES.join(", "), &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passed(p: f64) -> AssumptionCheck {
        AssumptionCheck::Passed {
            p_values: vec![GroupPValue {
                group: "Hardware".to_string(),
                p_value: p,
            }],
        }
    }

    fn not_tested() -> AssumptionCheck {
        AssumptionCheck::NotTested {
            notice: NORMALITY_NOTICE.to_string(),
        }
    }

    #[test]
    fn test_selection_states() {
        let rejected = AssumptionCheck::Rejected { p_values: vec![] };
        let failed = AssumptionCheck::Failed {
            test: TestKind::Levene,
            group: "Hardware, Software, Custodial".to_string(),
            message: "degenerate".to_string(),
        };

        assert_eq!(
            TestSelection::from_checks(&passed(0.4), &passed(0.3)),
            TestSelection::ParametricEligible
        );
        assert_eq!(
            TestSelection::from_checks(&passed(0.4), &rejected),
            TestSelection::NonParametricRequired
        );
        assert_eq!(
            TestSelection::from_checks(&passed(0.4), &failed),
            TestSelection::NonParametricRequired
        );
        assert_eq!(
            TestSelection::from_checks(&not_tested(), &passed(0.3)),
            TestSelection::InsufficientData
        );
    }

    #[test]
    fn test_selection_picks_test() {
        assert_eq!(TestSelection::ParametricEligible.test(), TestKind::OneWayAnova);
        assert_eq!(TestSelection::NonParametricRequired.test(), TestKind::KruskalWallis);
        assert_eq!(TestSelection::InsufficientData.test(), TestKind::KruskalWallis);
    }

    #[test]
    fn test_normality_requires_all_p_above_level() {
        let p = |v: f64| GroupPValue {
            group: "g".to_string(),
            p_value: v,
        };
        assert!(AssumptionCheck::from_p_values(vec![p(0.2), p(0.06), p(0.9)], 0.05).holds());
        assert!(!AssumptionCheck::from_p_values(vec![p(0.2), p(0.05), p(0.9)], 0.05).holds());
    }

    #[test]
    fn test_small_groups_skip_checks() {
        let config = AnalysisConfig::default();
        let a = [3.1];
        let b = [2.9, 3.4];
        let c = [4.1, 3.8, 3.9];
        let samples: [&[f64]; 3] = [&a, &b, &c];

        assert_eq!(check_normality(&samples, &config), not_tested());
        assert_eq!(
            check_homogeneity(&samples, &config),
            AssumptionCheck::NotTested {
                notice: HOMOGENEITY_NOTICE.to_string()
            }
        );
    }

    #[test]
    fn test_constant_group_fails_normality() {
        let config = AnalysisConfig::default();
        let a = [3.0, 3.0, 3.0];
        let b = [2.9, 3.4, 3.1];
        let c = [4.1, 3.8, 3.9];
        let samples: [&[f64]; 3] = [&a, &b, &c];

        match check_normality(&samples, &config) {
            AssumptionCheck::Failed { test, group, .. } => {
                assert_eq!(test, TestKind::ShapiroWilk);
                assert_eq!(group, "Hardware");
            }
            other => panic!("unexpected check: {other:?}"),
        }
    }
}
