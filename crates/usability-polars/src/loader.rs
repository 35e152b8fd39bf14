//! Reading and cleaning the experiment data

use crate::config::{
    InputFormat, LoadOptions, EXPERT, HEURISTICS, PROMPT, REQUIRED_COLUMNS, TYPE, VALIDATION,
    WALLET,
};
use crate::workbook::read_workbook;
use crate::{Error, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Read the raw table, header at `options.header_offset`
pub fn read_frame(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }

    let format = options.format.resolve(path);
    let df = match format {
        InputFormat::Csv => read_delimited(path, options)?,
        InputFormat::Spreadsheet | InputFormat::Auto => read_workbook(path, options)?,
    };

    debug!(
        path = %path.display(),
        ?format,
        header_offset = options.header_offset,
        rows = df.height(),
        columns = df.width(),
        "read experiment data"
    );
    Ok(df)
}

fn read_delimited(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(options.header_offset)
        .with_infer_schema_length(None)
        .map_parse_options(|parse| parse.with_separator(options.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Columns produced by blank or unlabelled header cells
pub fn is_placeholder_column(name: &str) -> bool {
    let unlabelled = |name: &str| {
        let name = name.trim();
        if name.is_empty() || name.starts_with("Unnamed") {
            return true;
        }
        name.strip_prefix("column_")
            .is_some_and(|index| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
    };
    unlabelled(name) || repeated_header(name).is_some_and(unlabelled)
}

/// The header a `<name>_duplicated_<n>` column repeats
pub fn repeated_header(name: &str) -> Option<&str> {
    name.rsplit_once("_duplicated_")
        .filter(|(_, index)| !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
        .map(|(source, _)| source)
}

/// Repeated required headers are ambiguous; other repeats are kept
fn check_repeated_headers(df: &DataFrame) -> Result<()> {
    for name in df.get_column_names() {
        let Some(source) = repeated_header(name.as_str()) else {
            continue;
        };
        if REQUIRED_COLUMNS.contains(&source) {
            return Err(Error::Schema(format!(
                "column {source} appears more than once in the header"
            )));
        }
        warn!(column = %name, source, "repeated header kept as a separate column");
    }
    Ok(())
}

/// Drop placeholder columns, check the layout and normalise column types
pub fn clean(df: DataFrame) -> Result<DataFrame> {
    let keep: Vec<PlSmallStr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !is_placeholder_column(name.as_str()))
        .cloned()
        .collect();
    let dropped = df.width() - keep.len();
    let mut df = df.select(keep)?;
    if dropped > 0 {
        debug!(dropped, "dropped placeholder columns");
    }

    check_repeated_headers(&df)?;
    validate_required_columns(&df)?;

    for name in [WALLET, TYPE] {
        require_complete(&df, name)?;
        let labels = trimmed_labels(&df, name)?;
        df.with_column(labels)?;
    }
    // Expert is carried as a label; it takes no part in the tests
    let expert = trimmed_labels(&df, EXPERT)?;
    df.with_column(expert)?;

    for name in [PROMPT, VALIDATION] {
        require_complete(&df, name)?;
    }

    for name in HEURISTICS {
        let scores = df
            .column(name)?
            .as_materialized_series()
            .strict_cast(&DataType::Float64)
            .map_err(|e| Error::Schema(format!("heuristic column {name} is not numeric: {e}")))?;
        df.with_column(scores)?;
    }

    debug!(rows = df.height(), "cleaned experiment table");
    Ok(df)
}

fn validate_required_columns(df: &DataFrame) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| df.get_column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns(missing))
    }
}

fn require_complete(df: &DataFrame, name: &str) -> Result<()> {
    let nulls = df.column(name)?.null_count();
    if nulls > 0 {
        return Err(Error::Schema(format!(
            "column {name} has {nulls} missing value(s)"
        )));
    }
    Ok(())
}

fn trimmed_labels(df: &DataFrame, name: &str) -> Result<Column> {
    let as_text = df.column(name)?.cast(&DataType::String)?;
    let trimmed: StringChunked = as_text
        .str()?
        .into_iter()
        .map(|value| value.map(str::trim))
        .collect();
    Ok(trimmed.with_name(name.into()).into_series().into())
}
