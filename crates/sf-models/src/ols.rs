//! Ordinary Least Squares (OLS) linear regression
//!
//! The regression engine: builds the design matrix from a table and a
//! validated specification, solves the least-squares problem, and computes
//! the full inference block (standard errors, t/p-values, confidence
//! intervals, R², F-statistic, information criteria and residual
//! statistics). Everything runs in double precision with a deterministic
//! decomposition, so identical input reproduces identical output bit for
//! bit.

#[cfg(test)]
mod tests;

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use sf_core::data::RawTable;
use sf_core::spec::ModelSpec;

use crate::base::{FitStatistics, RegressionReport, ResidualStatistics, TermEstimate, Vector};
use crate::design::{CategoricalEncoding, DesignMatrix};
use crate::error::{ModelError, Result};
use crate::solve;

// ==================== Configuration ====================

/// Regression engine configuration
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Categorical expansion rule
    pub encoding: CategoricalEncoding,
    /// Confidence level for coefficient intervals
    pub confidence_level: f64,
    /// Relative singular-value tolerance for rank detection
    pub rank_tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            encoding: CategoricalEncoding::DropFirst,
            confidence_level: 0.95,
            rank_tolerance: 1e-10,
        }
    }
}

// ==================== Model ====================

/// OLS model: a specification plus engine configuration
#[derive(Debug, Clone)]
pub struct OlsModel {
    spec: ModelSpec,
    config: FitConfig,
}

impl OlsModel {
    /// Create a model with the default configuration
    pub fn new(spec: ModelSpec) -> Self {
        Self {
            spec,
            config: FitConfig::default(),
        }
    }

    /// Set the engine configuration
    pub fn config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Fit the model against a table.
    pub fn fit(&self, table: &RawTable) -> Result<FittedOls> {
        let design = DesignMatrix::build(table, &self.spec, self.config.encoding)?;

        let n = design.n_obs();
        let p = design.n_terms();

        if n <= p {
            return Err(ModelError::InsufficientData {
                n_obs: n,
                n_terms: p,
            });
        }

        let ls = solve::least_squares(design.x(), design.y(), self.config.rank_tolerance)?;

        let fitted_values = design.x().dot(&ls.coefficients);
        let residuals = design.y() - &fitted_values;

        let rss = residuals.mapv(|r| r * r).sum();
        let sst = total_sum_of_squares(design.y(), design.has_intercept());

        let df_residual = n - p;
        let sigma2 = rss / df_residual as f64;
        let residual_std_error = sigma2.sqrt();

        let standard_errors = ls.xtx_inv.diag().mapv(|v| (v * sigma2).sqrt().max(1e-10));

        let (t_statistics, p_values, ci_lower, ci_upper) = inference(
            &ls.coefficients,
            &standard_errors,
            df_residual,
            self.config.confidence_level,
        )?;

        let r_squared = if sst > 0.0 { 1.0 - rss / sst } else { f64::NAN };
        let df_model = if design.has_intercept() { p - 1 } else { p };
        let adj_r_squared = if design.has_intercept() {
            1.0 - (1.0 - r_squared) * ((n as f64 - 1.0) / df_residual as f64)
        } else {
            1.0 - (1.0 - r_squared) * (n as f64 / df_residual as f64)
        };

        let (f_statistic, f_p_value) = f_statistic(rss, sst, df_model, df_residual)?;

        let log_likelihood = log_likelihood(n, rss);
        let aic = 2.0 * p as f64 - 2.0 * log_likelihood;
        let bic = (n as f64).ln() * p as f64 - 2.0 * log_likelihood;

        let statistics = FitStatistics {
            n_obs: n,
            n_dropped: design.n_dropped(),
            df_residual,
            df_model,
            r_squared,
            adj_r_squared,
            residual_std_error,
            f_statistic,
            f_p_value,
            log_likelihood,
            aic,
            bic,
        };

        let residual_statistics = residual_statistics(&residuals);

        Ok(FittedOls {
            response: self.spec.response().to_string(),
            design,
            coefficients: ls.coefficients,
            standard_errors,
            t_statistics,
            p_values,
            ci_lower,
            ci_upper,
            fitted_values,
            residuals,
            singular_values: ls.singular_values,
            condition_number: ls.condition_number,
            statistics,
            residual_statistics,
        })
    }
}

/// Convenience function: fit with an explicit configuration
pub fn fit(table: &RawTable, spec: &ModelSpec, config: &FitConfig) -> Result<FittedOls> {
    OlsModel::new(spec.clone()).config(config.clone()).fit(table)
}

// ==================== Fitted Model ====================

/// Result of a successful OLS fit
#[derive(Debug, Clone)]
pub struct FittedOls {
    response: String,
    design: DesignMatrix,
    coefficients: Vector,
    standard_errors: Vector,
    t_statistics: Vector,
    p_values: Vector,
    ci_lower: Vector,
    ci_upper: Vector,
    fitted_values: Vector,
    residuals: Vector,
    singular_values: Vec<f64>,
    condition_number: f64,
    statistics: FitStatistics,
    residual_statistics: ResidualStatistics,
}

impl FittedOls {
    /// Response column name
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Design matrix the fit ran on
    pub fn design(&self) -> &DesignMatrix {
        &self.design
    }

    /// Coefficient vector, in term order
    pub fn coefficients(&self) -> &Vector {
        &self.coefficients
    }

    /// Standard errors
    pub fn standard_errors(&self) -> &Vector {
        &self.standard_errors
    }

    /// Fitted values
    pub fn fitted_values(&self) -> &Vector {
        &self.fitted_values
    }

    /// Residuals
    pub fn residuals(&self) -> &Vector {
        &self.residuals
    }

    /// Singular values of the design matrix, descending
    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Condition number of the design matrix
    pub fn condition_number(&self) -> f64 {
        self.condition_number
    }

    /// Whole-model statistics
    pub fn statistics(&self) -> &FitStatistics {
        &self.statistics
    }

    /// Residual distribution statistics
    pub fn residual_statistics(&self) -> &ResidualStatistics {
        &self.residual_statistics
    }

    /// Assemble the serializable report consumed by the renderer.
    pub fn report(&self) -> RegressionReport {
        let terms = self
            .design
            .term_names()
            .iter()
            .enumerate()
            .map(|(i, name)| TermEstimate {
                name: name.clone(),
                estimate: self.coefficients[i],
                std_error: self.standard_errors[i],
                t_statistic: self.t_statistics[i],
                p_value: self.p_values[i],
                ci_lower: self.ci_lower[i],
                ci_upper: self.ci_upper[i],
                is_intercept: i == 0 && self.design.has_intercept(),
            })
            .collect();

        RegressionReport {
            response: self.response.clone(),
            terms,
            statistics: self.statistics,
            residual_statistics: self.residual_statistics,
            residuals: self.residuals.to_vec(),
            fitted_values: self.fitted_values.to_vec(),
        }
    }
}

// ==================== Statistics Helpers ====================

/// SST: centered around the mean when an intercept is present, uncentered
/// otherwise.
fn total_sum_of_squares(y: &Vector, has_intercept: bool) -> f64 {
    if has_intercept {
        let mean = y.mean().unwrap_or(0.0);
        y.iter().map(|&yi| (yi - mean).powi(2)).sum()
    } else {
        y.iter().map(|&yi| yi * yi).sum()
    }
}

/// t-statistics, two-tailed p-values and confidence bounds.
fn inference(
    coefficients: &Vector,
    standard_errors: &Vector,
    df_residual: usize,
    confidence_level: f64,
) -> Result<(Vector, Vector, Vector, Vector)> {
    let t_statistics: Vector = coefficients
        .iter()
        .zip(standard_errors.iter())
        .map(|(&coef, &se)| coef / se)
        .collect();

    let t_dist =
        StudentsT::new(0.0, 1.0, df_residual as f64).map_err(|e| ModelError::Numerical {
            message: format!("Failed to create t-distribution: {}", e),
            operation: "inference".to_string(),
        })?;

    let p_values: Vector = t_statistics
        .iter()
        .map(|&t| (2.0 * (1.0 - t_dist.cdf(t.abs()))).clamp(0.0, 1.0))
        .collect();

    let alpha = 1.0 - confidence_level;
    let t_critical = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let ci_lower: Vector = coefficients
        .iter()
        .zip(standard_errors.iter())
        .map(|(&coef, &se)| coef - t_critical * se)
        .collect();

    let ci_upper: Vector = coefficients
        .iter()
        .zip(standard_errors.iter())
        .map(|(&coef, &se)| coef + t_critical * se)
        .collect();

    Ok((t_statistics, p_values, ci_lower, ci_upper))
}

/// F-statistic against the null model; undefined for intercept-only fits.
fn f_statistic(
    rss: f64,
    sst: f64,
    df_model: usize,
    df_residual: usize,
) -> Result<(Option<f64>, Option<f64>)> {
    if df_model == 0 {
        return Ok((None, None));
    }

    let ess = (sst - rss).max(0.0);
    let f = (ess / df_model as f64) / (rss / df_residual as f64);

    if !f.is_finite() {
        return Ok((Some(f), None));
    }

    let f_dist = FisherSnedecor::new(df_model as f64, df_residual as f64).map_err(|e| {
        ModelError::Numerical {
            message: format!("Failed to create F-distribution: {}", e),
            operation: "f_statistic".to_string(),
        }
    })?;

    let p = (1.0 - f_dist.cdf(f)).clamp(0.0, 1.0);
    Ok((Some(f), Some(p)))
}

/// Gaussian log-likelihood at the ML variance estimate RSS / n.
fn log_likelihood(n: usize, rss: f64) -> f64 {
    let n = n as f64;
    let sigma2 = (rss / n).max(f64::MIN_POSITIVE);
    -0.5 * n * ((2.0 * std::f64::consts::PI * sigma2).ln() + 1.0)
}

fn residual_statistics(residuals: &Vector) -> ResidualStatistics {
    let mean = residuals.mean().unwrap_or(0.0);
    let std_dev = residuals.std(1.0);

    ResidualStatistics {
        min: residuals.iter().fold(f64::INFINITY, |a, &b| a.min(b)),
        q1: quantile(residuals, 0.25),
        median: quantile(residuals, 0.5),
        q3: quantile(residuals, 0.75),
        max: residuals.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b)),
        mean,
        std_dev,
        skewness: skewness(residuals, mean, std_dev),
        kurtosis: excess_kurtosis(residuals, mean, std_dev),
        durbin_watson: durbin_watson(residuals),
    }
}

fn quantile(data: &Vector, q: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let idx = (sorted.len() as f64 - 1.0) * q;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = idx - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

pub(crate) fn skewness(data: &Vector, mean: f64, std: f64) -> f64 {
    let n = data.len() as f64;
    if n < 3.0 || std < 1e-10 {
        return 0.0;
    }

    let sum_cubes: f64 = data.iter().map(|&x| (x - mean).powi(3)).sum();
    (sum_cubes / n) / std.powi(3)
}

pub(crate) fn excess_kurtosis(data: &Vector, mean: f64, std: f64) -> f64 {
    let n = data.len() as f64;
    if n < 4.0 || std < 1e-10 {
        return 0.0;
    }

    let sum_quarts: f64 = data.iter().map(|&x| (x - mean).powi(4)).sum();
    (sum_quarts / n) / std.powi(4) - 3.0
}

fn durbin_watson(residuals: &Vector) -> f64 {
    let n = residuals.len();
    if n < 2 {
        return 0.0;
    }

    let mut sum_sq_diff = 0.0;
    for i in 1..n {
        let diff = residuals[i] - residuals[i - 1];
        sum_sq_diff += diff * diff;
    }

    let sum_sq: f64 = residuals.iter().map(|&r| r * r).sum();

    if sum_sq < 1e-10 {
        0.0
    } else {
        sum_sq_diff / sum_sq
    }
}
