use std::cmp::Ordering;
use std::fmt;

use super::expr::CompareOp;
use super::field::FieldKind;

/// A literal operand on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed integer literal, e.g. `10` or `-3`.
    Int(i64),
    /// A single-quoted string literal with the quotes stripped.
    Str(String),
}

/// A borrowed view of one record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(i64),
    Str(&'a str),
}

impl Value {
    /// The field kind this literal can be compared against.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Int(_) => FieldKind::Integer,
            Value::Str(_) => FieldKind::String,
        }
    }
}

impl FieldValue<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Integer,
            FieldValue::Str(_) => FieldKind::String,
        }
    }

    /// Compare this attribute to a literal using the given operator.
    /// Returns `None` when the kinds differ; strings compare case-sensitively.
    #[must_use]
    pub fn compare(&self, op: CompareOp, literal: &Value) -> Option<bool> {
        let ord = match (self, literal) {
            (FieldValue::Int(a), Value::Int(b)) => a.cmp(b),
            (FieldValue::Str(a), Value::Str(b)) => (*a).cmp(b.as_str()),
            _ => return None,
        };
        Some(op.holds(ord))
    }
}

impl CompareOp {
    pub(crate) fn holds(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Neq => ord != Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Gte => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Lte => ord != Ordering::Greater,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "'{v}'"),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Str(v) => write!(f, "'{v}'"),
        }
    }
}
