use crate::types::{CompiledExpr, Node};
use crate::{EvalError, Expr, Field};

/// Bind an expression to the record schema.
///
/// Every field name is resolved to a [`Field`] and every literal is checked
/// against that field's kind. Groups are dropped, since they only shape the tree.
///
/// # Errors
///
/// Returns [`EvalError::UnknownField`] or [`EvalError::TypeMismatch`] for the
/// first offending comparison, left to right.
pub fn bind(expr: &Expr) -> Result<CompiledExpr, EvalError> {
    Ok(CompiledExpr {
        root: bind_node(expr)?,
    })
}

fn bind_node(expr: &Expr) -> Result<Node, EvalError> {
    match expr {
        Expr::Compare { field, op, value } => {
            let resolved = Field::from_name(field).ok_or_else(|| EvalError::UnknownField {
                field: field.clone(),
            })?;
            if resolved.kind() != value.kind() {
                return Err(EvalError::TypeMismatch {
                    field: field.clone(),
                    expected: resolved.kind(),
                    found: value.kind(),
                });
            }
            Ok(Node::Compare {
                field: resolved,
                op: *op,
                value: value.clone(),
            })
        }
        Expr::And(a, b) => Ok(Node::And(Box::new(bind_node(a)?), Box::new(bind_node(b)?))),
        Expr::Or(a, b) => Ok(Node::Or(Box::new(bind_node(a)?), Box::new(bind_node(b)?))),
        Expr::Group(inner) => bind_node(inner),
    }
}
