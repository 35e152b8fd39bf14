//! Derived analysis columns

use crate::config::{
    BACKUP_PROMPT, BACKUP_PROOF, HEURISTICS, NO, PROMPT, TASK_MEAN, TASK_TOTAL, VALIDATION, WALLET,
    YES,
};
use crate::{Error, Result};
use polars::prelude::*;
use tracing::debug;

/// Add the backup labels and the task score aggregates
pub fn enrich(mut df: DataFrame) -> Result<DataFrame> {
    for (source, target) in [(PROMPT, BACKUP_PROMPT), (VALIDATION, BACKUP_PROOF)] {
        let labels = binary_labels(&df, source)?;
        df.with_column(Series::new(target.into(), labels))?;
    }

    let total = HEURISTICS
        .iter()
        .fold(lit(0.0), |sum, name| sum + col(*name));
    let df = df
        .lazy()
        .with_columns([
            total.clone().alias(TASK_TOTAL),
            (total / lit(HEURISTICS.len() as f64)).alias(TASK_MEAN),
        ])
        .collect()?;

    if let Some(row) = first_null(&df, TASK_TOTAL)? {
        let wallet = df
            .column(WALLET)?
            .str()?
            .get(row)
            .unwrap_or("<unknown>")
            .to_string();
        return Err(Error::Schema(format!(
            "row {} (wallet {wallet}) has a missing heuristic score",
            row + 1
        )));
    }

    debug!(rows = df.height(), "derived backup labels and task scores");
    Ok(df)
}

/// Map a 0/1 indicator column onto "No"/"Yes"
fn binary_labels(df: &DataFrame, source: &str) -> Result<Vec<&'static str>> {
    let values = df
        .column(source)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|_| Error::Schema(format!("{source} must contain only 0 or 1")))?;

    values
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v == 1.0 => Ok(YES),
            Some(v) if v == 0.0 => Ok(NO),
            Some(v) => Err(Error::Schema(format!(
                "{source} must be 0 or 1, found {v} in row {}",
                row + 1
            ))),
            None => Err(Error::Schema(format!(
                "{source} is missing in row {}",
                row + 1
            ))),
        })
        .collect()
}

fn first_null(df: &DataFrame, name: &str) -> Result<Option<usize>> {
    Ok(df.column(name)?.f64()?.into_iter().position(|v| v.is_none()))
}
