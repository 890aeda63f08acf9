//! File ingestion
//!
//! Turns uploaded bytes into a validated [`RawTable`] behind a single
//! interface. The format is chosen from a caller-supplied hint (file
//! extension or MIME type), never by sniffing the content. The size bound
//! is checked before any parsing so an oversized upload fails immediately.

mod delimited;
mod workbook;


use crate::data::RawTable;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated text
    Csv,
    /// Excel workbook container
    Xlsx,
}

impl Format {
    /// Resolve a caller-supplied hint (a bare extension, a file name, or a
    /// MIME type) to a format.
    pub fn from_hint(hint: &str) -> Result<Self, ParseError> {
        let lower = hint.trim().to_ascii_lowercase();

        let ext = match lower.rsplit_once('.') {
            Some((_, ext)) => ext.to_string(),
            None => lower.clone(),
        };

        match ext.as_str() {
            "csv" | "text/csv" => Ok(Format::Csv),
            "xlsx" | "xls" => Ok(Format::Xlsx),
            _ if lower == "application/vnd.ms-excel"
                || lower
                    == "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" =>
            {
                Ok(Format::Xlsx)
            }
            _ => Err(ParseError::UnsupportedFormat { hint: hint.to_string() }),
        }
    }
}

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Maximum accepted upload size in bytes
    pub max_bytes: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            // 16 MiB is generous for the single-user spreadsheet uploads
            // this pipeline serves
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Errors that can occur while decoding an upload
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Upload of {actual} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error("Unsupported format hint '{hint}'; expected csv or xlsx")]
    UnsupportedFormat { hint: String },

    #[error("Malformed delimited text: {message}")]
    Delimited { message: String },

    #[error("Unreadable workbook container: {message}")]
    Workbook { message: String },

    #[error("Header row contains an empty column name (position {position})")]
    EmptyHeader { position: usize },

    #[error("Duplicate header name '{name}'")]
    DuplicateHeader { name: String },

    #[error("Row {row} has {actual} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Input contains no data rows")]
    EmptyTable,

    #[error("Input contains no columns")]
    NoColumns,
}

/// Parse uploaded bytes into a table under the declared format.
///
/// The original byte buffer is not retained; the returned table owns all
/// of its data.
pub fn load(bytes: &[u8], format: Format, config: &LoadConfig) -> Result<RawTable, ParseError> {
    if bytes.len() > config.max_bytes {
        return Err(ParseError::PayloadTooLarge {
            limit: config.max_bytes,
            actual: bytes.len(),
        });
    }

    match format {
        Format::Csv => delimited::parse(bytes),
        Format::Xlsx => workbook::parse(bytes),
    }
}

/// Shared header validation: non-empty, unique names.
fn check_headers(headers: &[String]) -> Result<(), ParseError> {
    if headers.is_empty() {
        return Err(ParseError::NoColumns);
    }

    let mut seen = std::collections::HashSet::new();
    for (i, name) in headers.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ParseError::EmptyHeader { position: i });
        }
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateHeader { name: name.clone() });
        }
    }

    Ok(())
}

/// Assemble validated headers and row-major cells into a table.
fn build_table(
    headers: Vec<String>,
    rows: Vec<Vec<crate::data::Cell>>,
) -> Result<RawTable, ParseError> {
    check_headers(&headers)?;

    if rows.is_empty() {
        return Err(ParseError::EmptyTable);
    }

    let ncols = headers.len();
    let mut columns: Vec<Vec<crate::data::Cell>> = vec![Vec::with_capacity(rows.len()); ncols];
    for row in rows {
        debug_assert_eq!(row.len(), ncols);
        for (j, cell) in row.into_iter().enumerate() {
            columns[j].push(cell);
        }
    }

    let mut builder = crate::data::TableBuilder::new();
    for (name, cells) in headers.into_iter().zip(columns) {
        builder = builder
            .with_column(name, cells)
            .map_err(|e| ParseError::Delimited {
                message: e.to_string(),
            })?;
    }

    builder.build().map_err(|e| ParseError::Delimited {
        message: e.to_string(),
    })
}
