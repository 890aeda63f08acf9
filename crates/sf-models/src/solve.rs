//! Dense least-squares solver
//!
//! The numerical core behind the regression engine, kept behind one narrow
//! interface so the surrounding validation and diagnostics never touch the
//! linear-algebra library directly. Storage is ndarray throughout the
//! crate; the decomposition itself runs on nalgebra.
//!
//! The solve uses a thin SVD of the design matrix: rank is decided by a
//! relative singular-value tolerance, coefficients come from the
//! pseudo-inverse applied to the response, and the unscaled covariance
//! (X'X)⁻¹ = V Σ⁻² V' falls out of the same decomposition. SVD is fully
//! deterministic for a given input.

use nalgebra::{DMatrix, DVector};

use crate::base::{Matrix, Vector};
use crate::error::{ModelError, Result};

/// Solution of a full-rank least-squares problem
#[derive(Debug, Clone)]
pub(crate) struct LeastSquares {
    /// Coefficient vector, one entry per design-matrix column
    pub coefficients: Vector,
    /// Unscaled covariance (X'X)⁻¹; multiply by σ² for coefficient
    /// covariance
    pub xtx_inv: Matrix,
    /// Singular values of the design matrix, descending
    pub singular_values: Vec<f64>,
    /// Ratio of largest to smallest singular value
    pub condition_number: f64,
}

/// Solve min ‖Xβ − y‖² for a full-rank X.
///
/// Fails with [`ModelError::SingularMatrix`] when the smallest singular
/// value falls below `rank_tolerance · σ_max`. Collinear predictors are
/// reported, never dropped.
pub(crate) fn least_squares(x: &Matrix, y: &Vector, rank_tolerance: f64) -> Result<LeastSquares> {
    let n = x.nrows();
    let p = x.ncols();

    let x_na = to_dmatrix(x);
    let y_na = to_dvector(y);

    let svd = x_na.svd(true, true);
    let u = svd.u.as_ref().ok_or_else(|| numerical("SVD produced no U factor"))?;
    let v_t = svd.v_t.as_ref().ok_or_else(|| numerical("SVD produced no V factor"))?;

    // nalgebra orders singular values descending
    let singular_values: Vec<f64> = svd.singular_values.iter().copied().collect();
    let s_max = singular_values.first().copied().unwrap_or(0.0);
    let s_min = singular_values.last().copied().unwrap_or(0.0);

    let condition_number = if s_min > 0.0 {
        s_max / s_min
    } else {
        f64::INFINITY
    };

    if s_max <= 0.0 || s_min <= rank_tolerance * s_max {
        return Err(ModelError::SingularMatrix { condition_number });
    }

    // β = V Σ⁻¹ U' y
    let k = singular_values.len().min(n).min(p);
    let ut_y = u.transpose() * &y_na;
    let mut scaled = DVector::zeros(k);
    for i in 0..k {
        scaled[i] = ut_y[i] / singular_values[i];
    }
    let coefficients = v_t.transpose() * scaled;

    // (X'X)⁻¹ = V Σ⁻² V'
    let v = v_t.transpose();
    let mut v_scaled = DMatrix::zeros(p, k);
    for j in 0..k {
        let inv_s = 1.0 / singular_values[j];
        for i in 0..p {
            v_scaled[(i, j)] = v[(i, j)] * inv_s;
        }
    }
    let xtx_inv = &v_scaled * v_scaled.transpose();

    Ok(LeastSquares {
        coefficients: to_array1(&coefficients),
        xtx_inv: to_array2(&xtx_inv),
        singular_values,
        condition_number,
    })
}

fn numerical(message: &str) -> ModelError {
    ModelError::Numerical {
        message: message.to_string(),
        operation: "least_squares".to_string(),
    }
}

// ==================== ndarray ↔ nalgebra ====================

fn to_dmatrix(a: &Matrix) -> DMatrix<f64> {
    // Array2 iteration is row-major in logical order, matching
    // from_row_slice regardless of the underlying layout
    let data: Vec<f64> = a.iter().copied().collect();
    DMatrix::from_row_slice(a.nrows(), a.ncols(), &data)
}

fn to_dvector(v: &Vector) -> DVector<f64> {
    DVector::from_vec(v.to_vec())
}

fn to_array1(v: &DVector<f64>) -> Vector {
    Vector::from_vec(v.as_slice().to_vec())
}

fn to_array2(m: &DMatrix<f64>) -> Matrix {
    let (nrows, ncols) = m.shape();
    let mut result = Matrix::zeros((nrows, ncols));
    for i in 0..nrows {
        for j in 0..ncols {
            result[[i, j]] = m[(i, j)];
        }
    }
    result
}

// ==================== Tests ====================
