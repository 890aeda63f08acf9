//! Builder pattern for constructing RawTables

use indexmap::IndexMap;

use super::*;

/// Builder for creating RawTables
pub struct TableBuilder {
    columns: IndexMap<String, Vec<Cell>>,
    nrows: Option<usize>,
}

impl TableBuilder {
    /// Create a new TableBuilder
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            nrows: None,
        }
    }

    /// Add a column to the table
    pub fn with_column<S: Into<String>>(mut self, name: S, cells: Vec<Cell>) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DataError::EmptyColumnName);
        }

        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn(name));
        }

        // Check dimension consistency
        match self.nrows {
            Some(n) if cells.len() != n => {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", cells.len()),
                });
            }
            None => {
                self.nrows = Some(cells.len());
            }
            _ => {}
        }

        self.columns.insert(name, cells);
        Ok(self)
    }

    /// Add a column of numbers
    pub fn with_numbers<S: Into<String>>(self, name: S, values: Vec<f64>) -> Result<Self> {
        self.with_column(name, values.into_iter().map(Cell::Number).collect())
    }

    /// Add a column of text labels
    pub fn with_texts<S: Into<String>, T: AsRef<str>>(self, name: S, values: &[T]) -> Result<Self> {
        self.with_column(
            name,
            values
                .iter()
                .map(|s| Cell::Text(s.as_ref().to_string()))
                .collect(),
        )
    }

    /// Build the RawTable
    pub fn build(self) -> Result<RawTable> {
        let nrows = self.nrows.unwrap_or(0);

        Ok(RawTable {
            columns: self.columns,
            nrows,
        })
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
