//! Group-by and column extraction

use crate::{Error, Result, UsabilityFrameExt};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

fn numeric_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    let column = df
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;

    match column.dtype() {
        DataType::Float64
        | DataType::Float32
        | DataType::Int64
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt64
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => Ok(column),
        dt => Err(Error::TypeMismatch {
            expected: "numeric".to_string(),
            got: format!("{:?}", dt),
        }),
    }
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df
        .column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))?;

    column.str().map_err(|_| Error::TypeMismatch {
        expected: "string".to_string(),
        got: format!("{:?}", column.dtype()),
    })
}

impl UsabilityFrameExt for DataFrame {
    fn group_means(&self, keys: &[&str], values: &[&str]) -> Result<DataFrame> {
        for key in keys {
            self.column(key)
                .map_err(|_| Error::InvalidColumn(key.to_string()))?;
        }
        for value in values {
            numeric_column(self, value)?;
        }

        let by: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
        let aggs: Vec<Expr> = values
            .iter()
            .map(|value| col(*value).cast(DataType::Float64).mean())
            .collect();
        let order: Vec<PlSmallStr> = keys.iter().map(|key| PlSmallStr::from(*key)).collect();

        let mut rows = self.clone().lazy();
        for key in keys {
            rows = rows.filter(col(*key).is_not_null());
        }

        let grouped = rows
            .group_by(by)
            .agg(aggs)
            .sort(order, SortMultipleOptions::default())
            .collect()?;

        debug!(?keys, groups = grouped.height(), "computed group means");
        Ok(grouped)
    }

    fn values_where(&self, key_column: &str, key: &str, value_column: &str) -> Result<Vec<f64>> {
        let keys = text_column(self, key_column)?;
        let values = numeric_column(self, value_column)?.cast(&DataType::Float64)?;

        Ok(keys
            .into_iter()
            .zip(values.f64()?)
            .filter_map(|(k, v)| match (k, v) {
                (Some(k), Some(v)) if k == key => Some(v),
                _ => None,
            })
            .collect())
    }

    fn distinct_labels(&self, column: &str) -> Result<Vec<String>> {
        let labels: BTreeSet<&str> = text_column(self, column)?.into_iter().flatten().collect();
        Ok(labels.into_iter().map(str::to_string).collect())
    }

    fn labels(&self, column: &str) -> Result<Vec<String>> {
        Ok(text_column(self, column)?
            .into_iter()
            .map(|label| label.unwrap_or_default().to_string())
            .collect())
    }

    fn float_values(&self, column: &str) -> Result<Vec<f64>> {
        let values = numeric_column(self, column)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }
}
