//! Core data structures for StatFlow
//!
//! An uploaded dataset is held as a [`RawTable`]: an ordered sequence of
//! named columns, each an ordered sequence of tagged [`Cell`] values.
//! Tables are immutable once built and live only for the duration of a
//! single analysis request.

mod builder;
mod cell;
mod summary;
mod table;


// Re-exports
pub use builder::TableBuilder;
pub use cell::Cell;
pub use summary::{summarize, VariableSummary};
pub use table::RawTable;

// Type alias for common use cases
pub type FloatArray = ndarray::Array1<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column name must be non-empty")]
    EmptyColumnName,

    #[error("Operation requires numeric data, column '{column}' holds text")]
    NonNumericData { column: String },
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
