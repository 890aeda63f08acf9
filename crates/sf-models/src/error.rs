//! Model-related error types

use thiserror::Error;

use sf_core::data::DataError;
use sf_core::ingest::ParseError;
use sf_core::spec::SpecError;

/// Typed failure surface of the analysis pipeline.
///
/// Every variant stems from invalid input, not transient infrastructure;
/// none are retried and each aborts only the current request.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Upload could not be decoded under the declared format
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Variable selection is self-contradictory or references unusable columns
    #[error("Invalid model specification: {0}")]
    Spec(#[from] SpecError),

    /// Data-related error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Missing values present under the reject policy
    #[error("Column '{column}' has {n_missing} missing value(s) and the policy is reject")]
    MissingData { column: String, n_missing: usize },

    /// Fewer usable observations than model terms
    #[error("Not enough data: {n_obs} observations for {n_terms} model terms")]
    InsufficientData { n_obs: usize, n_terms: usize },

    /// Design matrix is rank-deficient beyond tolerance
    #[error("Design matrix is singular (condition number {condition_number:.3e}); predictors are collinear")]
    SingularMatrix { condition_number: f64 },

    /// Too few complete pairs for a correlation
    #[error("Only {n_pairs} complete pairs of '{x}' and '{y}'; at least 3 are required")]
    InsufficientPairs {
        x: String,
        y: String,
        n_pairs: usize,
    },

    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    Numerical { message: String, operation: String },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
