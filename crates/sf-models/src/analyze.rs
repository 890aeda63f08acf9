//! Analysis pipeline
//!
//! The single operation the host collaborator calls: raw upload bytes plus
//! the user's column selections in, a complete serializable analysis out.
//! Each request is a pure, stateless transformation chain (load, inspect,
//! validate the selections, fit, diagnose) with no shared state between
//! requests. Thresholds and limits travel in an explicit [`AnalysisConfig`]
//! rather than ambient globals, so concurrent requests with different
//! configurations cannot interfere.


use serde::{Deserialize, Serialize};

use sf_core::ingest::{load, Format, LoadConfig};
use sf_core::schema::{inspect, ColumnProfile, InspectConfig};
use sf_core::spec::{MissingPolicy, SpecBuilder};

use crate::base::RegressionReport;
use crate::diagnostics::{diagnose, DiagnosticsConfig, DiagnosticsReport};
use crate::error::Result;
use crate::ols::{FitConfig, OlsModel};

/// The user's column selections for one fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Response column name
    pub response: String,
    /// Predictor column names, in display order
    pub predictors: Vec<String>,
    /// Include an intercept term
    pub intercept: bool,
    /// Missing-value policy
    pub missing_policy: MissingPolicy,
}

/// Configuration for every pipeline stage
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub load: LoadConfig,
    pub inspect: InspectConfig,
    pub fit: FitConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Everything the renderer needs for one request
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Column classification, in table order
    pub profiles: Vec<ColumnProfile>,
    /// Fit result and coefficient table
    pub report: RegressionReport,
    /// Advisory diagnostics
    pub diagnostics: DiagnosticsReport,
}

/// Run the full pipeline on one upload.
///
/// The format comes from the caller-supplied hint, never from the bytes;
/// the user's selections are validated against the inspector's profiles,
/// never trusted. Identical bytes and parameters produce an identical
/// analysis.
pub fn analyze(
    bytes: &[u8],
    format_hint: &str,
    request: &AnalysisRequest,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    let format = Format::from_hint(format_hint)?;
    let table = load(bytes, format, &config.load)?;

    let profiles = inspect(&table, &config.inspect);

    let spec = SpecBuilder::new()
        .response(&request.response)
        .predictors(request.predictors.iter().cloned())
        .intercept(request.intercept)
        .missing_policy(request.missing_policy)
        .build(&profiles)?;

    let fitted = OlsModel::new(spec).config(config.fit.clone()).fit(&table)?;
    let diagnostics = diagnose(&fitted, &config.diagnostics);

    Ok(Analysis {
        profiles,
        report: fitted.report(),
        diagnostics,
    })
}
