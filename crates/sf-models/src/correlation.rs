//! Bivariate correlation
//!
//! Pearson's r over pairwise-complete observations, with the two-tailed
//! p-value from the t transform. The natural companion to OLS: in simple
//! regression r² equals the model R².

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use sf_core::data::{Cell, DataError, RawTable};

use crate::error::{ModelError, Result};

/// Pearson correlation between two columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correlation {
    pub x: String,
    pub y: String,
    /// Pearson correlation coefficient
    pub r: f64,
    /// Two-tailed p-value for the null of zero correlation
    pub p_value: f64,
    /// Complete pairs used
    pub n: usize,
}

/// Compute Pearson's r between two numeric columns.
///
/// Rows where either value is missing are skipped; fewer than 3 complete
/// pairs is an error.
pub fn pearson(table: &RawTable, x: &str, y: &str) -> Result<Correlation> {
    let x_cells = column(table, x)?;
    let y_cells = column(table, y)?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (cx, cy) in x_cells.iter().zip(y_cells.iter()) {
        match (cx, cy) {
            (Cell::Text(_), _) => {
                return Err(non_numeric(x));
            }
            (_, Cell::Text(_)) => {
                return Err(non_numeric(y));
            }
            (Cell::Number(vx), Cell::Number(vy)) => {
                xs.push(*vx);
                ys.push(*vy);
            }
            _ => {}
        }
    }

    let n = xs.len();
    if n < 3 {
        return Err(ModelError::InsufficientPairs {
            x: x.to_string(),
            y: y.to_string(),
            n_pairs: n,
        });
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&vx, &vy) in xs.iter().zip(ys.iter()) {
        let dx = vx - mean_x;
        let dy = vy - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < 1e-300 || var_y < 1e-300 {
        // A constant column has no defined correlation
        return Ok(Correlation {
            x: x.to_string(),
            y: y.to_string(),
            r: f64::NAN,
            p_value: f64::NAN,
            n,
        });
    }

    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);
    let p_value = p_value(r, n)?;

    Ok(Correlation {
        x: x.to_string(),
        y: y.to_string(),
        r,
        p_value,
        n,
    })
}

fn p_value(r: f64, n: usize) -> Result<f64> {
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;

    if denom <= 0.0 {
        // |r| == 1: exact linear relation
        return Ok(0.0);
    }

    let t = r.abs() * (df / denom).sqrt();
    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| ModelError::Numerical {
        message: format!("Failed to create t-distribution: {}", e),
        operation: "pearson".to_string(),
    })?;

    Ok((2.0 * (1.0 - t_dist.cdf(t))).clamp(0.0, 1.0))
}

fn column<'t>(table: &'t RawTable, name: &str) -> Result<&'t [Cell]> {
    table
        .column(name)
        .ok_or_else(|| ModelError::Data(DataError::ColumnNotFound(name.to_string())))
}

fn non_numeric(column: &str) -> ModelError {
    ModelError::Data(DataError::NonNumericData {
        column: column.to_string(),
    })
}

// ==================== Tests ====================
