//! H3a / H3b: effect of backup prompting and validation on G1 and G5

use super::{Hypothesis, HypothesisResult};
use crate::config::AnalysisConfig;
use serde::Serialize;
use tracing::debug;
use usability_inference::{HypothesisTest, MannWhitneyU, TwoSampleTest};
use usability_polars::{
    Dataset, Result, UsabilityFrameExt, BACKUP_PROMPT, BACKUP_PROOF, EXPERT, NO, WALLET, YES,
};

/// Heuristics compared between the backup conditions
pub const BACKUP_HEURISTICS: [&str; 2] = ["G1", "G5"];

/// The backup feature a wallet either has or lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupCondition {
    /// The wallet prompted for a backup (H3a)
    Prompt,
    /// The wallet validated the backup (H3b)
    Validation,
}

impl BackupCondition {
    /// Derived label column splitting the rows
    pub fn column(&self) -> &'static str {
        match self {
            Self::Prompt => BACKUP_PROMPT,
            Self::Validation => BACKUP_PROOF,
        }
    }

    pub fn hypothesis(&self) -> Hypothesis {
        match self {
            Self::Prompt => Hypothesis::H3a,
            Self::Validation => Hypothesis::H3b,
        }
    }
}

/// H3a or H3b record: one result per heuristic in [`BACKUP_HEURISTICS`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupComparison {
    pub condition: BackupCondition,
    pub results: Vec<HypothesisResult>,
}

/// Compare G1 and G5 between wallets with and without the backup feature
///
/// Scores are first averaged per (wallet, rater group, condition); the
/// "Yes" means form the first sample, so the reported U belongs to it.
/// The two heuristics are tested independently; a missing condition level
/// only skips that heuristic.
pub fn compare_backup(
    data: &Dataset,
    condition: BackupCondition,
    config: &AnalysisConfig,
) -> Result<BackupComparison> {
    let label_column = condition.column();
    let test = MannWhitneyU::new();

    let mut results = Vec::with_capacity(BACKUP_HEURISTICS.len());
    for heuristic in BACKUP_HEURISTICS {
        let means = data.group_means(&[WALLET, EXPERT, label_column], &[heuristic])?;
        let with = means.values_where(label_column, YES, heuristic)?;
        let without = means.values_where(label_column, NO, heuristic)?;
        debug!(
            ?condition,
            heuristic,
            yes = with.len(),
            no = without.len(),
            "split backup condition"
        );

        results.push(HypothesisResult::evaluate(
            condition.hypothesis(),
            heuristic,
            test.kind(),
            &format!("{label_column} Yes vs No"),
            test.test(&with, &without),
            config.significance,
        ));
    }

    Ok(BackupComparison { condition, results })
}
