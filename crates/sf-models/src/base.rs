//! Result contract types
//!
//! Everything the presentation layer consumes: the per-term coefficient
//! records, the fit and residual statistics, and the full report. All of
//! it serializes to an order-preserving structured form so the renderer
//! never re-derives a statistic.

pub mod statistics;
pub mod summary;
pub mod term;

pub use statistics::{FitStatistics, ResidualStatistics};
pub use summary::RegressionReport;
pub use term::TermEstimate;

/// Vector type alias for 1D arrays
pub type Vector = ndarray::Array1<f64>;

/// Matrix type alias for 2D arrays
pub type Matrix = ndarray::Array2<f64>;
