//! Design matrix construction
//!
//! Step one of every fit: apply the missing-value policy, encode
//! categorical predictors, and assemble the numeric matrix the solver
//! consumes. Encoding is deterministic (categorical levels are sorted
//! lexicographically before one-hot expansion), so identical input always
//! produces an identical matrix.
//!
//! Full column rank is a precondition for a valid fit, not guaranteed
//! here: a constant column or duplicated predictor passes through and is
//! reported as a singular matrix by the solver. Terms are never silently
//! dropped.


use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use sf_core::data::{Cell, DataError, RawTable};
use sf_core::schema::ColumnKind;
use sf_core::spec::{MissingPolicy, ModelSpec};

use crate::base::{Matrix, Vector};
use crate::error::{ModelError, Result};

/// How categorical predictors expand into indicator columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoricalEncoding {
    /// One-hot with the first (lexicographically smallest) level dropped
    /// when the model has an intercept
    #[default]
    DropFirst,
    /// One-hot keeping every level
    FullRank,
}

/// Numeric matrix derived from a table and a model specification
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    x: Matrix,
    y: Vector,
    term_names: Vec<String>,
    has_intercept: bool,
    n_dropped: usize,
}

impl DesignMatrix {
    /// Build the design matrix for a fit request.
    ///
    /// Under [`MissingPolicy::Reject`] the first used column holding a
    /// missing value fails the whole build; under
    /// [`MissingPolicy::DropRow`] offending observations are removed
    /// before encoding.
    pub fn build(
        table: &RawTable,
        spec: &ModelSpec,
        encoding: CategoricalEncoding,
    ) -> Result<Self> {
        let used: Vec<&[Cell]> = spec
            .used_columns()
            .map(|name| {
                table
                    .column(name)
                    .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
            })
            .collect::<std::result::Result<_, _>>()?;

        let keep = apply_missing_policy(spec, &used)?;
        let n_obs = keep.len();
        let n_dropped = table.nrows() - n_obs;

        // Response
        let response_cells = used[0];
        let y: Vector = keep
            .iter()
            .map(|&i| number_at(response_cells, i, spec.response()))
            .collect::<Result<Vec<f64>>>()?
            .into();

        // Predictors, expanded term by term
        let mut term_names = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();

        if spec.intercept() {
            term_names.push("(Intercept)".to_string());
            columns.push(vec![1.0; n_obs]);
        }

        for (idx, name) in spec.predictors().iter().enumerate() {
            let cells = used[idx + 1];
            match spec.predictor_kinds()[idx] {
                ColumnKind::Numeric => {
                    let values = keep
                        .iter()
                        .map(|&i| number_at(cells, i, name))
                        .collect::<Result<Vec<f64>>>()?;
                    term_names.push(name.clone());
                    columns.push(values);
                }
                ColumnKind::Categorical => {
                    encode_categorical(
                        name,
                        cells,
                        &keep,
                        spec.intercept(),
                        encoding,
                        &mut term_names,
                        &mut columns,
                    );
                }
                ColumnKind::Unusable => {
                    // SpecBuilder rejects unusable columns; unreachable for
                    // specs built through it
                    return Err(ModelError::Data(DataError::NonNumericData {
                        column: name.clone(),
                    }));
                }
            }
        }

        let n_terms = columns.len();
        let mut x = Matrix::zeros((n_obs, n_terms));
        for (j, column) in columns.iter().enumerate() {
            for (i, &value) in column.iter().enumerate() {
                x[[i, j]] = value;
            }
        }

        Ok(Self {
            x,
            y,
            term_names,
            has_intercept: spec.intercept(),
            n_dropped,
        })
    }

    /// Observations used in the fit
    pub fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    /// Design-matrix columns, intercept included
    pub fn n_terms(&self) -> usize {
        self.x.ncols()
    }

    /// The matrix itself
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    /// Response vector, aligned with the matrix rows
    pub fn y(&self) -> &Vector {
        &self.y
    }

    /// Column names, in matrix order
    pub fn term_names(&self) -> &[String] {
        &self.term_names
    }

    /// Whether the first column is an intercept
    pub fn has_intercept(&self) -> bool {
        self.has_intercept
    }

    /// Observations removed by the drop-row policy
    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }
}

/// Resolve the missing-value policy to the list of kept row indices.
fn apply_missing_policy(spec: &ModelSpec, used: &[&[Cell]]) -> Result<Vec<usize>> {
    match spec.missing_policy() {
        MissingPolicy::Reject => {
            for (name, cells) in spec.used_columns().zip(used) {
                let n_missing = cells.iter().filter(|c| c.is_missing()).count();
                if n_missing > 0 {
                    return Err(ModelError::MissingData {
                        column: name.to_string(),
                        n_missing,
                    });
                }
            }
            Ok((0..used[0].len()).collect())
        }
        MissingPolicy::DropRow => {
            let nrows = used[0].len();
            Ok((0..nrows)
                .filter(|&i| used.iter().all(|cells| !cells[i].is_missing()))
                .collect())
        }
    }
}

fn number_at(cells: &[Cell], i: usize, column: &str) -> Result<f64> {
    cells[i].as_number().ok_or_else(|| {
        ModelError::Data(DataError::NonNumericData {
            column: column.to_string(),
        })
    })
}

/// One-hot encode a categorical predictor over the kept rows.
///
/// Levels are sorted; the first is dropped only when the model has an
/// intercept, the encoding says so, and at least two levels are present.
/// A single-level categorical keeps its one (constant) indicator so the
/// collinearity it causes surfaces at the solver instead of vanishing.
fn encode_categorical(
    name: &str,
    cells: &[Cell],
    keep: &[usize],
    intercept: bool,
    encoding: CategoricalEncoding,
    term_names: &mut Vec<String>,
    columns: &mut Vec<Vec<f64>>,
) {
    let levels: BTreeSet<String> = keep
        .iter()
        .filter_map(|&i| cells[i].label())
        .collect();

    let drop_first =
        intercept && encoding == CategoricalEncoding::DropFirst && levels.len() >= 2;

    for level in levels.iter().skip(usize::from(drop_first)) {
        let column: Vec<f64> = keep
            .iter()
            .map(|&i| match cells[i].label() {
                Some(label) if &label == level => 1.0,
                _ => 0.0,
            })
            .collect();

        term_names.push(format!("{}[{}]", name, level));
        columns.push(column);
    }
}
