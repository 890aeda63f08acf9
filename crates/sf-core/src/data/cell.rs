//! Tagged cell values
//!
//! Spreadsheet ingestion produces loosely typed values: any cell may hold a
//! number, free text, or nothing at all. [`Cell`] makes that explicit so
//! downstream stages branch on an exhaustively checked tag instead of
//! inspecting runtime types.

use serde::{Deserialize, Serialize};

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A finite floating point number
    Number(f64),
    /// Free text
    Text(String),
    /// No value
    Missing,
}

impl Cell {
    /// Parse a raw string field into a cell.
    ///
    /// Empty strings and the usual NA spellings become [`Cell::Missing`];
    /// anything that parses as a finite number becomes [`Cell::Number`];
    /// the rest is kept as text. Non-finite parses (`inf`, `NaN`) are
    /// treated as missing rather than poisoning later arithmetic.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || is_na_token(trimmed) {
            return Cell::Missing;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Cell::Number(value),
            Ok(_) => Cell::Missing,
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    /// Numeric value, if this cell holds one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Check for a missing value
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Canonical label used for distinct-value counting and categorical
    /// level naming. Missing cells have no label.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Number(v) => Some(format!("{}", v)),
            Cell::Text(s) => Some(s.clone()),
            Cell::Missing => None,
        }
    }
}

fn is_na_token(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "na" | "n/a" | "nan" | "null" | "none"
    )
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => write!(f, ""),
        }
    }
}
