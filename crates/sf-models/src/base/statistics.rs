//! Statistical structures for fit results

use serde::{Deserialize, Serialize};

/// Whole-model fit statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitStatistics {
    /// Observations used in the fit
    pub n_obs: usize,
    /// Observations removed by the drop-row missing policy
    pub n_dropped: usize,
    /// Residual degrees of freedom (n − p)
    pub df_residual: usize,
    /// Model degrees of freedom (excluding the intercept)
    pub df_model: usize,
    /// R-squared
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Residual standard error
    pub residual_std_error: f64,
    /// F-statistic; absent for an intercept-only model
    pub f_statistic: Option<f64>,
    /// F-statistic p-value
    pub f_p_value: Option<f64>,
    /// Log-likelihood
    pub log_likelihood: f64,
    /// AIC
    pub aic: f64,
    /// BIC
    pub bic: f64,
}

/// Residual distribution statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResidualStatistics {
    /// Minimum residual
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum residual
    pub max: f64,
    /// Mean residual
    pub mean: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
    /// Durbin-Watson statistic
    pub durbin_watson: f64,
}
