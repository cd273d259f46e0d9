use thiserror::Error;

use super::field::FieldKind;

/// Errors produced when binding an expression to the record schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    #[error("type mismatch: field '{field}' is {expected} but the literal is {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
}

impl EvalError {
    /// The field name the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            EvalError::UnknownField { field } | EvalError::TypeMismatch { field, .. } => field,
        }
    }
}
