//! Per-variable summary statistics
//!
//! The first thing an analyst checks before fitting anything: location,
//! spread, tail percentiles, and the shape indicators (skewness, excess
//! kurtosis) that decide whether normality is even plausible.

use serde::{Deserialize, Serialize};

use super::*;

/// Statistical summary of one numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSummary {
    pub name: String,
    /// Non-missing observation count
    pub count: usize,
    pub n_missing: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    pub std: f64,
    pub min: f64,
    pub p5: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub p95: f64,
    pub max: f64,
    pub skewness: f64,
    /// Excess kurtosis; 0 for a normal distribution
    pub kurtosis: f64,
}

/// Summarize a numeric column of a table.
///
/// Missing cells are skipped and counted; a text cell anywhere in the
/// column is an error.
pub fn summarize(table: &RawTable, name: &str) -> Result<VariableSummary> {
    let values = table.numeric_values(name)?;
    let n_missing = table.missing_count(name)?;

    if values.is_empty() {
        return Ok(VariableSummary {
            name: name.to_string(),
            count: 0,
            n_missing,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p5: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            p95: f64::NAN,
            max: f64::NAN,
            skewness: f64::NAN,
            kurtosis: f64::NAN,
        });
    }

    let mean = values.mean().unwrap_or(f64::NAN);
    let std = values.std(1.0);
    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

    Ok(VariableSummary {
        name: name.to_string(),
        count: values.len(),
        n_missing,
        mean,
        std,
        min,
        p5: quantile(&values, 0.05).unwrap_or(f64::NAN),
        q25: quantile(&values, 0.25).unwrap_or(f64::NAN),
        median: quantile(&values, 0.5).unwrap_or(f64::NAN),
        q75: quantile(&values, 0.75).unwrap_or(f64::NAN),
        p95: quantile(&values, 0.95).unwrap_or(f64::NAN),
        max,
        skewness: skewness(&values, mean, std),
        kurtosis: excess_kurtosis(&values, mean, std),
    })
}

/// Linear-interpolated quantile of a float array
fn quantile(arr: &FloatArray, q: f64) -> Option<f64> {
    if arr.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = arr.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let n = sorted.len();
    let index = (n as f64 - 1.0) * q;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

fn skewness(values: &FloatArray, mean: f64, std: f64) -> f64 {
    let n = values.len() as f64;
    if n < 3.0 || std < 1e-10 {
        return 0.0;
    }

    let sum_cubes: f64 = values.iter().map(|&x| (x - mean).powi(3)).sum();
    (sum_cubes / n) / std.powi(3)
}

fn excess_kurtosis(values: &FloatArray, mean: f64, std: f64) -> f64 {
    let n = values.len() as f64;
    if n < 4.0 || std < 1e-10 {
        return 0.0;
    }

    let sum_quarts: f64 = values.iter().map(|&x| (x - mean).powi(4)).sum();
    (sum_quarts / n) / std.powi(4) - 3.0
}
