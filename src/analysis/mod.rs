//! Hypothesis analyses over the experiment dataset
//!
//! Each analysis reads the immutable [`Dataset`] and produces structured
//! records; nothing here prints. The blocks are independent of each other
//! and [`run_analysis`] only fixes the order they are reported in.
//!
//! Insufficient data and numerical failures of individual tests are turned
//! into [`Outcome::Skipped`] and [`Outcome::Failed`] so one degenerate block
//! never aborts the others. Errors reaching the caller are data-layer errors
//! (schema, missing columns) and invalid configuration.

pub mod backup;
pub mod descriptive;
pub mod wallet_type;

pub use backup::{compare_backup, BackupComparison, BackupCondition, BACKUP_HEURISTICS};
pub use descriptive::{summarize_wallets, WalletSummary};
pub use wallet_type::{
    compare_wallet_types, AssumptionCheck, GroupPValue, TestSelection, WalletTypeComparison,
    HOMOGENEITY_NOTICE, NORMALITY_NOTICE, WALLET_TYPES,
};

use crate::config::AnalysisConfig;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};
use usability_inference::{TestKind, TestResult};
use usability_polars::{Dataset, Result};

/// The hypotheses examined by the study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hypothesis {
    /// Wallet-level descriptive averages
    H1,
    /// Task scores differ by wallet type
    H2,
    /// Prompting for a backup affects G1 and G5
    H3a,
    /// Validating the backup affects G1 and G5
    H3b,
}

impl Hypothesis {
    pub fn title(&self) -> &'static str {
        match self {
            Self::H1 => "H1: Wallet-Level Averages",
            Self::H2 => "H2: Group Comparison by Wallet Type",
            Self::H3a => "H3a: Backup Prompt Effect",
            Self::H3b => "H3b: Backup Validation Effect",
        }
    }
}

/// Whether the data supports the hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Supported,
    NotSupported,
}

impl Verdict {
    /// Supported iff `p_value < significance`
    pub fn from_p_value(p_value: f64, significance: f64) -> Self {
        if p_value < significance {
            Self::Supported
        } else {
            Self::NotSupported
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supported => f.write_str("supported"),
            Self::NotSupported => f.write_str("not supported"),
        }
    }
}

/// How a single test run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The test ran; sizes of the compared groups
    Completed { sample_sizes: Vec<usize> },
    /// Too few observations to run the test
    Skipped { reason: String },
    /// The test could not be evaluated on this input
    Failed { group: String, message: String },
}

/// One hypothesis test with its verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HypothesisResult {
    pub hypothesis: Hypothesis,
    /// What was compared, e.g. "TaskMean by Type" or "G1"
    pub label: String,
    pub test: TestKind,
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    /// Present only when the test completed
    pub verdict: Option<Verdict>,
    pub outcome: Outcome,
}

impl HypothesisResult {
    /// Record the result of running `test` on `group`
    ///
    /// Insufficient data becomes [`Outcome::Skipped`]; any other error is
    /// logged and becomes [`Outcome::Failed`].
    pub fn evaluate(
        hypothesis: Hypothesis,
        label: impl Into<String>,
        test: TestKind,
        group: &str,
        result: usability_core::Result<TestResult>,
        significance: f64,
    ) -> Self {
        let label = label.into();
        let (statistic, p_value, verdict, outcome) = match result {
            Ok(result) => {
                let verdict = Verdict::from_p_value(result.p_value, significance);
                info!(
                    hypothesis = ?hypothesis,
                    %label,
                    test = %result.test,
                    statistic = result.statistic,
                    p_value = result.p_value,
                    %verdict,
                    "hypothesis test completed"
                );
                (
                    Some(result.statistic),
                    Some(result.p_value),
                    Some(verdict),
                    Outcome::Completed {
                        sample_sizes: result.sample_sizes,
                    },
                )
            }
            Err(err) if err.is_insufficient_data() => {
                info!(hypothesis = ?hypothesis, %label, %test, error = %err, "not enough data");
                (None, None, None, Outcome::Skipped { reason: err.to_string() })
            }
            Err(err) => {
                warn!(hypothesis = ?hypothesis, %label, %test, group, error = %err, "test failed");
                (
                    None,
                    None,
                    None,
                    Outcome::Failed {
                        group: group.to_string(),
                        message: err.to_string(),
                    },
                )
            }
        };

        Self {
            hypothesis,
            label,
            test,
            statistic,
            p_value,
            verdict,
            outcome,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, Outcome::Completed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped { .. })
    }
}

/// Everything the report shows, in presentation order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub significance: f64,
    pub wallet_summary: Vec<WalletSummary>,
    pub wallet_type: WalletTypeComparison,
    pub backup_prompt: BackupComparison,
    pub backup_validation: BackupComparison,
}

impl AnalysisReport {
    /// All verdict-bearing results: H2, then H3a, then H3b
    pub fn hypothesis_results(&self) -> Vec<&HypothesisResult> {
        std::iter::once(&self.wallet_type.result)
            .chain(&self.backup_prompt.results)
            .chain(&self.backup_validation.results)
            .collect()
    }
}

/// Run H1, H2, H3a and H3b on `data`
pub fn run_analysis(data: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;

    let wallet_summary = summarize_wallets(data)?;
    let wallet_type = compare_wallet_types(data, config)?;
    let backup_prompt = compare_backup(data, BackupCondition::Prompt, config)?;
    let backup_validation = compare_backup(data, BackupCondition::Validation, config)?;

    Ok(AnalysisReport {
        significance: config.significance,
        wallet_summary,
        wallet_type,
        backup_prompt,
        backup_validation,
    })
}
