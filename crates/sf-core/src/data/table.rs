//! RawTable implementation for uploaded tabular data
//!
//! A RawTable is a rectangular, column-ordered view of one upload. All
//! columns have equal length and unique non-empty names; both invariants
//! are enforced by [`TableBuilder`](super::TableBuilder) and cannot be
//! broken afterwards because the table exposes no mutation.

use super::*;

use indexmap::IndexMap;

/// Validated in-memory table
#[derive(Clone, Debug, PartialEq)]
pub struct RawTable {
    pub(crate) columns: IndexMap<String, Vec<Cell>>,
    pub(crate) nrows: usize,
}

impl RawTable {
    /// Create a table from (name, cells) pairs
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Cell>)>,
        S: Into<String>,
    {
        let mut builder = TableBuilder::new();

        for (name, cells) in columns.into_iter() {
            builder = builder.with_column(name, cells)?;
        }

        builder.build()
    }

    /// Get the shape of the table (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Get the cells of a column
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Iterate over (name, cells) in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Extract the non-missing numeric values of a column.
    ///
    /// Fails when the column is absent or holds any text cell; missing
    /// cells are skipped.
    pub fn numeric_values(&self, name: &str) -> Result<FloatArray> {
        let cells = self
            .columns
            .get(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;

        let mut values = Vec::with_capacity(cells.len());
        for cell in cells {
            match cell {
                Cell::Number(v) => values.push(*v),
                Cell::Missing => {}
                Cell::Text(_) => {
                    return Err(DataError::NonNumericData {
                        column: name.to_string(),
                    });
                }
            }
        }

        Ok(FloatArray::from(values))
    }

    /// Count of missing cells in a column
    pub fn missing_count(&self, name: &str) -> Result<usize> {
        let cells = self
            .columns
            .get(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;

        Ok(cells.iter().filter(|c| c.is_missing()).count())
    }
}
