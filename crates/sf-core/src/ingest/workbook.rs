//! Spreadsheet workbook parsing
//!
//! Reads the first worksheet of an xlsx container. The first row is the
//! header; typed cells map onto [`Cell`] directly, and string cells go
//! through the same parse rules as delimited text so a column of numeric
//! strings still classifies as numeric.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::{build_table, ParseError};
use crate::data::{Cell, RawTable};

pub(super) fn parse(bytes: &[u8]) -> Result<RawTable, ParseError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ParseError::Workbook {
            message: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::EmptyTable)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ParseError::Workbook {
            message: e.to_string(),
        })?;

    let mut row_iter = range.rows();

    let headers: Vec<String> = match row_iter.next() {
        Some(header_row) => header_row.iter().map(header_label).collect(),
        None => return Err(ParseError::EmptyTable),
    };

    let rows: Vec<Vec<Cell>> = row_iter
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    build_table(headers, rows)
}

fn header_label(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => format!("{}", other).trim().to_string(),
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::Float(v) if v.is_finite() => Cell::Number(*v),
        Data::Float(_) => Cell::Missing,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => Cell::parse(s),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Missing,
    }
}
