//! Reading the experiment workbook

use crate::config::LoadOptions;
use crate::{Error, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Read the first (or the configured) worksheet of the workbook at `path`
///
/// The workbook kind is detected from the content, not the extension.
pub(crate) fn read_workbook(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let bytes = std::fs::read(path).map_err(calamine::Error::Io)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet = match &options.sheet {
        Some(sheet) => sheet.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Schema(format!("{} has no worksheets", path.display())))?,
    };
    let range = workbook.worksheet_range(&sheet)?;
    debug!(path = %path.display(), sheet = %sheet, "read worksheet");

    range_to_frame(&range, options.header_offset)
}

/// Build a table from a worksheet whose header is on row `header_offset`
///
/// Blank header cells become `Unnamed: <column>` and repeated headers
/// `<name>_duplicated_<n>`, the same names the text reader produces. Rows
/// with no values are skipped.
pub(crate) fn range_to_frame(range: &Range<Data>, header_offset: usize) -> Result<DataFrame> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Err(Error::Schema("worksheet is empty".to_string()));
    };
    let header_row = u32::try_from(header_offset)
        .ok()
        .filter(|row| *row <= end.0)
        .ok_or_else(|| {
            Error::Schema(format!(
                "worksheet has {} rows, header expected after {header_offset}",
                end.0 + 1
            ))
        })?;

    let columns: Vec<u32> = (start.1..=end.1).collect();
    let names = header_names(range, header_row, &columns);

    let rows: Vec<u32> = (header_row + 1..=end.0)
        .filter(|row| {
            columns
                .iter()
                .any(|col| range.get_value((*row, *col)).is_some_and(|cell| !is_missing(cell)))
        })
        .collect();

    let frame_columns: Vec<Column> = columns
        .iter()
        .zip(&names)
        .map(|(col, name)| {
            let cells: Vec<Option<&Data>> = rows
                .iter()
                .map(|row| range.get_value((*row, *col)).filter(|cell| !is_missing(cell)))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    let df = DataFrame::new(frame_columns)?;
    debug!(rows = df.height(), columns = df.width(), header_row, "converted worksheet");
    Ok(df)
}

fn header_names(range: &Range<Data>, header_row: u32, columns: &[u32]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    columns
        .iter()
        .map(|col| {
            let text = range
                .get_value((header_row, *col))
                .map(|cell| cell.to_string())
                .unwrap_or_default();
            let name = if text.trim().is_empty() {
                format!("Unnamed: {col}")
            } else {
                text
            };

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}_duplicated_{}", *count - 1)
            };
            *count += 1;
            unique
        })
        .collect()
}

fn is_missing(cell: &Data) -> bool {
    matches!(cell, Data::Empty | Data::Error(_))
}

/// Column type inferred from the non-empty cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Empty,
    Bool,
    Int,
    Float,
    Text,
}

impl CellKind {
    fn of(cell: &Data) -> Self {
        match cell {
            Data::Bool(_) => Self::Bool,
            Data::Int(_) => Self::Int,
            Data::Float(v) if is_integral(*v) => Self::Int,
            Data::Float(_) => Self::Float,
            Data::Empty | Data::Error(_) => Self::Empty,
            _ => Self::Text,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, kind) | (kind, Self::Empty) => kind,
            (a, b) if a == b => a,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            _ => Self::Text,
        }
    }
}

fn is_integral(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() < 9.007_199_254_740_992e15
}

fn build_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let kind = cells
        .iter()
        .flatten()
        .fold(CellKind::Empty, |kind, cell| kind.merge(CellKind::of(cell)));
    let name: PlSmallStr = name.into();

    match kind {
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Bool(b)) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name, values)
        }
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(v)) => Some(*v),
                    Some(Data::Float(v)) => Some(*v as i64),
                    _ => None,
                })
                .collect();
            Column::new(name, values)
        }
        CellKind::Float | CellKind::Empty => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Some(Data::Int(v)) => Some(*v as f64),
                    Some(Data::Float(v)) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name, values)
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(|c| c.to_string()))
                .collect();
            Column::new(name, values)
        }
    }
}
