//! Column classification
//!
//! Decides, per column, whether it can serve as a regression term: numeric
//! columns directly, categorical columns via encoding, and everything else
//! (free text, high cardinality) not at all. Inspection never fails; the
//! worst case is a table where every column is unusable.


use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::{Cell, RawTable};

/// Declared kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-missing cell is a number
    Numeric,
    /// Non-numeric but with few enough distinct values to one-hot encode
    Categorical,
    /// Free text or cardinality too high to encode
    Unusable,
}

impl ColumnKind {
    /// Check whether the column can appear in a model
    pub fn is_usable(&self) -> bool {
        !matches!(self, ColumnKind::Unusable)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Unusable => write!(f, "unusable"),
        }
    }
}

/// Per-column metadata derived from a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Count of missing cells
    pub n_missing: usize,
    /// Count of distinct non-missing values
    pub n_distinct: usize,
}

/// Inspector configuration
#[derive(Debug, Clone)]
pub struct InspectConfig {
    /// Highest distinct-value count a non-numeric column may have and
    /// still be treated as categorical
    pub max_categories: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { max_categories: 50 }
    }
}

/// Classify every column of a table, in table order.
pub fn inspect(table: &RawTable, config: &InspectConfig) -> Vec<ColumnProfile> {
    table
        .iter()
        .map(|(name, cells)| profile_column(name, cells, config))
        .collect()
}

fn profile_column(name: &str, cells: &[Cell], config: &InspectConfig) -> ColumnProfile {
    let mut n_missing = 0;
    let mut has_text = false;
    let mut distinct = BTreeSet::new();

    for cell in cells {
        match cell.label() {
            Some(label) => {
                if matches!(cell, Cell::Text(_)) {
                    has_text = true;
                }
                distinct.insert(label);
            }
            None => n_missing += 1,
        }
    }

    let kind = if !has_text {
        ColumnKind::Numeric
    } else if distinct.len() <= config.max_categories {
        ColumnKind::Categorical
    } else {
        ColumnKind::Unusable
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        n_missing,
        n_distinct: distinct.len(),
    }
}
