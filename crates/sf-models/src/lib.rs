//! OLS regression engine and analysis pipeline for StatFlow
//!
//! Fits ordinary-least-squares models against tables ingested by
//! `sf-core` and produces serializable, order-preserving reports: a
//! coefficient table with full inference statistics, fit metrics, and an
//! advisory diagnostics block for the renderer.
//!
//! # Example
//!
//! ```rust,ignore
//! use sf_models::prelude::*;
//!
//! let analysis = analyze(
//!     bytes,
//!     "upload.csv",
//!     &AnalysisRequest {
//!         response: "y".into(),
//!         predictors: vec!["x".into()],
//!         intercept: true,
//!         missing_policy: MissingPolicy::DropRow,
//!     },
//!     &AnalysisConfig::default(),
//! )?;
//!
//! println!("R² = {:.4}", analysis.report.statistics.r_squared);
//! ```

pub mod analyze;
pub mod base;
pub mod correlation;
pub mod design;
pub mod diagnostics;
pub mod error;
pub mod ols;
mod solve;

pub use crate::error::{ModelError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyze::{analyze, Analysis, AnalysisConfig, AnalysisRequest};
    pub use crate::base::{FitStatistics, RegressionReport, ResidualStatistics, TermEstimate};
    pub use crate::correlation::{pearson, Correlation};
    pub use crate::design::{CategoricalEncoding, DesignMatrix};
    pub use crate::diagnostics::{
        diagnose, ConditionSeverity, DiagnosticsConfig, DiagnosticsReport,
    };
    pub use crate::error::{ModelError, Result};
    pub use crate::ols::{FitConfig, FittedOls, OlsModel};
    pub use sf_core::data::{Cell, RawTable, TableBuilder};
    pub use sf_core::ingest::{load, Format, LoadConfig};
    pub use sf_core::schema::{inspect, ColumnKind, ColumnProfile, InspectConfig};
    pub use sf_core::spec::{MissingPolicy, ModelSpec, SpecBuilder};
}
