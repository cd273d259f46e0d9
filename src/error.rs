use thiserror::Error;

use crate::EvalError;
use crate::parse::ParseError;

/// A failure attributed to one named rule of a batch.
///
/// Returned by [`run()`](crate::run) and
/// [`BatchRunner::run()`](crate::BatchRunner::run) for the first failing rule,
/// and recorded per rule by [`BatchRunner::run_all()`](crate::BatchRunner::run_all).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error in rule '{rule}': {cause}")]
pub struct SegmentError {
    rule: String,
    #[source]
    cause: Cause,
}

/// The stage-specific cause of a [`SegmentError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Discriminant of a [`SegmentError`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    UnknownField,
    TypeMismatch,
}

impl SegmentError {
    pub(crate) fn new(rule: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            rule: rule.into(),
            cause: cause.into(),
        }
    }

    /// Name of the rule that failed.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    #[must_use]
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match &self.cause {
            Cause::Syntax(_) => ErrorKind::Syntax,
            Cause::Eval(EvalError::UnknownField { .. }) => ErrorKind::UnknownField,
            Cause::Eval(EvalError::TypeMismatch { .. }) => ErrorKind::TypeMismatch,
        }
    }
}
