use std::fmt;

use super::Value;
use super::field::Field;

/// Comparison operators supported in rule expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Expression tree produced by the parser. Field names are still strings;
/// [`bind`](crate::bind) resolves them into a [`CompiledExpr`].
///
/// `Display` prints the canonical form, and parsing that text yields an
/// equal tree for any tree the parser produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    /// A parenthesized sub-expression.
    Group(Box<Expr>),
}

/// A bound expression: every field resolved and type-checked against the
/// record schema. Evaluation of a `CompiledExpr` cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpr {
    pub(crate) root: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Compare {
        field: Field,
        op: CompareOp,
        value: Value,
    },
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl CompareOp {
    /// The canonical operator text.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare { field, op, value } => write!(f, "{field} {op} {value}"),
            Expr::And(a, b) => write!(f, "{a} and {b}"),
            Expr::Or(a, b) => write!(f, "{a} or {b}"),
            Expr::Group(inner) => write!(f, "({inner})"),
        }
    }
}

impl Expr {
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Wrap in parentheses.
    #[must_use]
    pub fn group(self) -> Expr {
        Expr::Group(Box::new(self))
    }

    /// Field names referenced by this expression, left to right.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Compare { field, .. } => out.push(field),
            Expr::And(a, b) | Expr::Or(a, b) => {
                a.collect_fields(out);
                b.collect_fields(out);
            }
            Expr::Group(inner) => inner.collect_fields(out),
        }
    }
}

/// Intermediate builder for field comparison expressions.
/// Created by [`field()`]; requires a comparison method to produce a valid [`Expr`].
#[derive(Debug, Clone)]
pub struct FieldExpr {
    name: String,
}

impl FieldExpr {
    fn compare(self, op: CompareOp, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            field: self.name,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Eq, value)
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Neq, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Gte, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Expr {
        self.compare(CompareOp::Lte, value)
    }
}

#[must_use]
pub fn field(name: &str) -> FieldExpr {
    FieldExpr {
        name: name.to_owned(),
    }
}
