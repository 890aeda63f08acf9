//! Delimited-text parsing
//!
//! Decoding tries UTF-8 first and falls back to Latin-1: files exported by
//! older spreadsheet tools in Western locales are the common source of
//! non-UTF-8 uploads, and every byte sequence is valid Latin-1.

use csv::ReaderBuilder;

use super::{build_table, ParseError};
use crate::data::{Cell, RawTable};

pub(super) fn parse(bytes: &[u8]) -> Result<RawTable, ParseError> {
    let text = decode(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::Delimited {
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let ncols = headers.len();
    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ParseError::Delimited {
            message: e.to_string(),
        })?;

        if record.len() != ncols {
            return Err(ParseError::RaggedRow {
                // 1-based, counting the header as row 1
                row: i + 2,
                expected: ncols,
                actual: record.len(),
            });
        }

        rows.push(record.iter().map(Cell::parse).collect());
    }

    build_table(headers, rows)
}

fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1 maps each byte to the code point of the same value
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
