//! Fit diagnostics
//!
//! Secondary statistics derived from a completed fit, used to flag
//! unreliable results: the design-matrix condition number, rule-of-thumb
//! sample-size checks, residual shape indicators, and the normal Q–Q
//! points the renderer plots. Diagnostics are advisory: they never fail
//! and never block a fit.
//!
//! Condition number interpretation follows the usual ladder:
//! κ < 30 well-conditioned, 30–100 moderate, 100–1000 high,
//! ≥ 1000 severe collinearity.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::ols::{excess_kurtosis, skewness, FittedOls};

/// Diagnostics thresholds
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Condition number above which near-collinearity is flagged
    pub condition_threshold: f64,
    /// Residual degrees of freedom below which the sample is flagged as
    /// too small for reliable inference
    pub min_residual_df: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            condition_threshold: 30.0,
            min_residual_df: 10,
        }
    }
}

/// Condition number severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionSeverity {
    /// κ < 30
    WellConditioned,
    /// 30 ≤ κ < 100
    Moderate,
    /// 100 ≤ κ < 1000
    High,
    /// κ ≥ 1000
    Severe,
}

impl ConditionSeverity {
    /// Classify a condition number
    pub fn classify(condition_number: f64) -> Self {
        if condition_number < 30.0 {
            Self::WellConditioned
        } else if condition_number < 100.0 {
            Self::Moderate
        } else if condition_number < 1000.0 {
            Self::High
        } else {
            Self::Severe
        }
    }

    /// Human-readable description of the severity
    pub fn description(&self) -> &'static str {
        match self {
            Self::WellConditioned => "Well-conditioned: numerically stable",
            Self::Moderate => "Moderate collinearity: some instability possible",
            Self::High => "High collinearity: numerical instability likely",
            Self::Severe => "Severe collinearity: coefficients may be unreliable",
        }
    }
}

/// One point of the normal Q–Q plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QqPoint {
    /// Theoretical standard-normal quantile
    pub theoretical: f64,
    /// Ordered sample residual
    pub sample: f64,
}

/// Advisory diagnostics for one fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Ratio of largest to smallest singular value of the design matrix
    pub condition_number: f64,
    pub severity: ConditionSeverity,
    /// Condition number exceeds the configured threshold
    pub near_collinear: bool,
    /// Residual degrees of freedom below the configured minimum
    pub insufficient_observations: bool,
    pub residual_skewness: f64,
    /// Excess kurtosis of the residuals
    pub residual_kurtosis: f64,
    /// Normal Q–Q points, ordered by theoretical quantile
    pub normal_qq: Vec<QqPoint>,
}

/// Derive diagnostics from a completed fit. Never fails.
pub fn diagnose(fitted: &FittedOls, config: &DiagnosticsConfig) -> DiagnosticsReport {
    let condition_number = fitted.condition_number();
    let severity = ConditionSeverity::classify(condition_number);

    let stats = fitted.statistics();
    let insufficient_observations = stats.df_residual < config.min_residual_df;

    let residuals = fitted.residuals();
    let mean = residuals.mean().unwrap_or(0.0);
    let std = residuals.std(1.0);

    DiagnosticsReport {
        condition_number,
        severity,
        near_collinear: !(condition_number < config.condition_threshold),
        insufficient_observations,
        residual_skewness: skewness(residuals, mean, std),
        residual_kurtosis: excess_kurtosis(residuals, mean, std),
        normal_qq: normal_qq_points(residuals),
    }
}

/// Normal Q–Q points using Blom plotting positions (i − 3/8)/(n + 1/4).
fn normal_qq_points(residuals: &crate::base::Vector) -> Vec<QqPoint> {
    let n = residuals.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = residuals.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    // Standard normal is always constructible
    let normal = match Normal::new(0.0, 1.0) {
        Ok(d) => d,
        Err(_) => return Vec::new(),
    };

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, sample)| {
            let position = (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25);
            QqPoint {
                theoretical: normal.inverse_cdf(position),
                sample,
            }
        })
        .collect()
}
