//! H1: wallet-level averages

use serde::Serialize;
use tracing::debug;
use usability_core::utils::round_to;
use usability_polars::{Dataset, Result, UsabilityFrameExt, HEURISTICS, TASK_MEAN, WALLET};

/// Mean heuristic scores of one wallet, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletSummary {
    pub wallet: String,
    /// Means of G1..G8 in order
    pub heuristics: [f64; 8],
    pub task_mean: f64,
}

/// Per-wallet means of every heuristic and of TaskMean, sorted by wallet
pub fn summarize_wallets(data: &Dataset) -> Result<Vec<WalletSummary>> {
    let mut values: Vec<&str> = HEURISTICS.to_vec();
    values.push(TASK_MEAN);

    let grouped = data.group_means(&[WALLET], &values)?;
    let wallets = grouped.labels(WALLET)?;
    let columns = HEURISTICS
        .iter()
        .map(|name| grouped.float_values(name))
        .collect::<Result<Vec<_>>>()?;
    let task_means = grouped.float_values(TASK_MEAN)?;

    let summary: Vec<WalletSummary> = wallets
        .into_iter()
        .enumerate()
        .map(|(row, wallet)| WalletSummary {
            wallet,
            heuristics: std::array::from_fn(|h| round_to(columns[h][row], 2)),
            task_mean: round_to(task_means[row], 2),
        })
        .collect();

    debug!(wallets = summary.len(), "summarised wallets");
    Ok(summary)
}
