//! Per-term estimate records

use serde::{Deserialize, Serialize};

/// One row of the coefficient table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermEstimate {
    /// Term name: the column name, `name[level]` for an encoded
    /// categorical level, or `(Intercept)`
    pub name: String,
    /// Coefficient estimate
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// t-statistic
    pub t_statistic: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Lower bound of the confidence interval
    pub ci_lower: f64,
    /// Upper bound of the confidence interval
    pub ci_upper: f64,
    /// Is this the intercept?
    pub is_intercept: bool,
}
