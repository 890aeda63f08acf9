//! Regression report

use serde::{Deserialize, Serialize};
use std::fmt;

use super::statistics::{FitStatistics, ResidualStatistics};
use super::term::TermEstimate;

/// Complete, immutable result of one fit request.
///
/// Term records, residuals and fitted values keep their order, so the
/// renderer can lay out the coefficient table and residual plot directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Response column name
    pub response: String,
    /// Coefficient table, one record per design-matrix column
    pub terms: Vec<TermEstimate>,
    /// Whole-model statistics
    pub statistics: FitStatistics,
    /// Residual distribution statistics
    pub residual_statistics: ResidualStatistics,
    /// Residuals, one per used observation
    pub residuals: Vec<f64>,
    /// Fitted values, aligned with the residuals
    pub fitted_values: Vec<f64>,
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Regression Summary")?;
        writeln!(f, "==================")?;
        writeln!(f, "Response: {}", self.response)?;
        writeln!(f, "Observations: {}", self.statistics.n_obs)?;
        if self.statistics.n_dropped > 0 {
            writeln!(f, "Dropped (missing): {}", self.statistics.n_dropped)?;
        }
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        writeln!(
            f,
            "{:<20} {:>12} {:>12} {:>12} {:>12}",
            "Term", "Estimate", "Std Error", "t-value", "p-value"
        )?;
        writeln!(
            f,
            "{:-<20} {:-<12} {:-<12} {:-<12} {:-<12}",
            "", "", "", "", ""
        )?;

        for term in &self.terms {
            writeln!(
                f,
                "{:<20} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                term.name, term.estimate, term.std_error, term.t_statistic, term.p_value
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Model Statistics:")?;
        writeln!(f, "  R-squared: {:.4}", self.statistics.r_squared)?;
        writeln!(f, "  Adjusted R-squared: {:.4}", self.statistics.adj_r_squared)?;
        if let Some(f_stat) = self.statistics.f_statistic {
            writeln!(f, "  F-statistic: {:.4}", f_stat)?;
        }
        if let Some(f_p) = self.statistics.f_p_value {
            writeln!(f, "  Prob (F-statistic): {:.4e}", f_p)?;
        }
        writeln!(f, "  Log-likelihood: {:.4}", self.statistics.log_likelihood)?;
        writeln!(f, "  AIC: {:.4}", self.statistics.aic)?;
        writeln!(f, "  BIC: {:.4}", self.statistics.bic)?;
        writeln!(
            f,
            "  Residual Std. Error: {:.4}",
            self.statistics.residual_std_error
        )?;
        writeln!(f, "  Residual DF: {}", self.statistics.df_residual)?;
        writeln!(f, "  Model DF: {}", self.statistics.df_model)?;

        Ok(())
    }
}
