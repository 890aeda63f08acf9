//! Model specification
//!
//! A [`ModelSpec`] is the validated description of one fit request: which
//! column is the response, which columns are predictors, whether an
//! intercept is included, and how missing values are handled. Validation
//! happens against the schema inspector's profiles only, never against
//! cell contents, so building a specification is pure and cheap.


use serde::{Deserialize, Serialize};

use crate::schema::{ColumnKind, ColumnProfile};

/// Rule governing observations with missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Remove any observation with a missing value in a used column
    #[default]
    DropRow,
    /// Fail the fit if any used column has a missing value
    Reject,
}

/// Errors raised while validating a model specification
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("No response column selected")]
    MissingResponse,

    #[error("At least one predictor is required")]
    EmptyPredictors,

    #[error("Response '{name}' cannot also be a predictor")]
    ResponseAmongPredictors { name: String },

    #[error("Predictor '{name}' selected more than once")]
    DuplicatePredictor { name: String },

    #[error("Column '{name}' not found. Available columns: {available:?}")]
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },

    #[error("Column '{name}' is unusable as a model term (free text or too many distinct values)")]
    UnusableColumn { name: String },

    #[error("Response '{name}' must be numeric, but is {kind}")]
    NonNumericResponse { name: String, kind: ColumnKind },
}

/// Validated model specification
///
/// Construction goes through [`SpecBuilder`], which guarantees: predictors
/// are non-empty and unique, the response is numeric and not among the
/// predictors, and every referenced column exists with a usable kind.
/// Column kinds are captured at validation time so the regression engine
/// knows how to encode each term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    response: String,
    predictors: Vec<String>,
    predictor_kinds: Vec<ColumnKind>,
    intercept: bool,
    missing: MissingPolicy,
}

impl ModelSpec {
    /// Response column name
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Predictor column names, in selection order
    pub fn predictors(&self) -> &[String] {
        &self.predictors
    }

    /// Kind of each predictor, parallel to [`predictors`](Self::predictors)
    pub fn predictor_kinds(&self) -> &[ColumnKind] {
        &self.predictor_kinds
    }

    /// Whether the model includes an intercept term
    pub fn intercept(&self) -> bool {
        self.intercept
    }

    /// Missing-value policy for this fit
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }

    /// All column names used by this spec: response first, then predictors
    pub fn used_columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.response.as_str()).chain(self.predictors.iter().map(|p| p.as_str()))
    }
}

/// Builder for validated model specifications
#[derive(Debug, Clone)]
pub struct SpecBuilder {
    response: Option<String>,
    predictors: Vec<String>,
    intercept: bool,
    missing: MissingPolicy,
}

impl SpecBuilder {
    /// Create a builder with an intercept and the drop-row policy
    pub fn new() -> Self {
        Self {
            response: None,
            predictors: Vec::new(),
            intercept: true,
            missing: MissingPolicy::DropRow,
        }
    }

    /// Select the response column
    pub fn response(mut self, name: impl Into<String>) -> Self {
        self.response = Some(name.into());
        self
    }

    /// Append one predictor column
    pub fn predictor(mut self, name: impl Into<String>) -> Self {
        self.predictors.push(name.into());
        self
    }

    /// Append several predictor columns, preserving order
    pub fn predictors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predictors.extend(names.into_iter().map(Into::into));
        self
    }

    /// Include or exclude the intercept term
    pub fn intercept(mut self, include: bool) -> Self {
        self.intercept = include;
        self
    }

    /// Set the missing-value policy
    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// Validate the selections against column profiles.
    pub fn build(self, profiles: &[ColumnProfile]) -> Result<ModelSpec, SpecError> {
        let response = self.response.ok_or(SpecError::MissingResponse)?;

        if self.predictors.is_empty() {
            return Err(SpecError::EmptyPredictors);
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.predictors {
            if name == &response {
                return Err(SpecError::ResponseAmongPredictors { name: name.clone() });
            }
            if !seen.insert(name.as_str()) {
                return Err(SpecError::DuplicatePredictor { name: name.clone() });
            }
        }

        let response_kind = lookup(profiles, &response)?;
        if response_kind != ColumnKind::Numeric {
            return Err(SpecError::NonNumericResponse {
                name: response,
                kind: response_kind,
            });
        }

        let mut predictor_kinds = Vec::with_capacity(self.predictors.len());
        for name in &self.predictors {
            let kind = lookup(profiles, name)?;
            if !kind.is_usable() {
                return Err(SpecError::UnusableColumn { name: name.clone() });
            }
            predictor_kinds.push(kind);
        }

        Ok(ModelSpec {
            response,
            predictors: self.predictors,
            predictor_kinds,
            intercept: self.intercept,
            missing: self.missing,
        })
    }
}

impl Default for SpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(profiles: &[ColumnProfile], name: &str) -> Result<ColumnKind, SpecError> {
    profiles
        .iter()
        .find(|p| p.name == name)
        .map(|p| {
            if p.kind.is_usable() {
                Ok(p.kind)
            } else {
                Err(SpecError::UnusableColumn {
                    name: name.to_string(),
                })
            }
        })
        .unwrap_or_else(|| {
            Err(SpecError::UnknownColumn {
                name: name.to_string(),
                available: profiles.iter().map(|p| p.name.clone()).collect(),
            })
        })
}
