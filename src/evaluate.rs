use crate::types::{CompiledExpr, Node};
use crate::{EvalError, Expr, Record};

/// Bind `expr` and evaluate it against `record`.
///
/// # Errors
///
/// Returns [`EvalError`] if the expression names an unknown field or compares
/// a field against a literal of the wrong type. Binding checks the whole tree
/// before any comparison runs, so the outcome never depends on short-circuiting.
pub fn evaluate(expr: &Expr, record: &Record) -> Result<bool, EvalError> {
    Ok(crate::compile::bind(expr)?.matches(record))
}

impl CompiledExpr {
    /// Evaluate against a record. `and` / `or` short-circuit.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        eval_node(&self.root, record)
    }
}

fn eval_node(node: &Node, record: &Record) -> bool {
    match node {
        Node::Compare { field, op, value } => {
            let matched = record.get(*field).compare(*op, value);
            // binding rejects literals of the wrong kind
            debug_assert!(matched.is_some(), "unchecked literal kind for field {field}");
            matched.unwrap_or(false)
        }
        Node::And(a, b) => eval_node(a, record) && eval_node(b, record),
        Node::Or(a, b) => eval_node(a, record) || eval_node(b, record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{field, parse};

    fn record() -> Record {
        Record {
            id: "u4".into(),
            level: 20,
            country: "Turkey".into(),
            first_session: 1_600_000_000,
            last_session: 1_700_000_000,
            purchase_amount: 25_000,
            last_purchase_at: 1_700_000_000,
        }
    }

    fn eval(text: &str) -> Result<bool, EvalError> {
        evaluate(&parse(text).unwrap(), &record())
    }

    #[test]
    fn eval_simple_gt() {
        assert_eq!(eval("level > 10"), Ok(true));
        assert_eq!(eval("level > 20"), Ok(false));
    }

    #[test]
    fn eval_all_compare_ops() {
        let cases = [
            ("level == 20", true),
            ("level != 20", false),
            ("level > 5", true),
            ("level >= 20", true),
            ("level >= 21", false),
            ("level < 30", true),
            ("level <= 20", true),
            ("level <= 19", false),
        ];
        for (text, expected) in cases {
            assert_eq!(eval(text), Ok(expected), "failed for {text}");
        }
    }

    #[test]
    fn eval_string_equality_is_exact() {
        assert_eq!(eval("country == 'Turkey'"), Ok(true));
        assert_eq!(eval("country == 'turkey'"), Ok(false));
        assert_eq!(eval("country == 'Turkey '"), Ok(false));
        assert_eq!(eval("country != 'Spain'"), Ok(true));
    }

    #[test]
    fn eval_string_ordering() {
        assert_eq!(eval("country > 'Spain'"), Ok(true));
        assert_eq!(eval("id < 'u5'"), Ok(true));
    }

    #[test]
    fn eval_and_or() {
        assert_eq!(eval("country == 'Turkey' and level >= 10"), Ok(true));
        assert_eq!(eval("country == 'Turkey' and level >= 100"), Ok(false));
        assert_eq!(eval("level > 100 or purchase_amount > 20000"), Ok(true));
        assert_eq!(eval("level > 100 or purchase_amount > 30000"), Ok(false));
    }

    #[test]
    fn eval_precedence() {
        // or(false, and(true, false)) == false; ((false or true) and false) == false
        assert_eq!(eval("level > 100 or level > 5 and country == 'X'"), Ok(false));
        // or(true, and(...)) == true regardless of the and-branch
        assert_eq!(eval("level > 5 or level > 100 and country == 'X'"), Ok(true));
        // grouping changes the result
        assert_eq!(eval("(level > 5 or level > 100) and country == 'X'"), Ok(false));
    }

    #[test]
    fn eval_group_is_transparent() {
        assert_eq!(eval("(level > 10)"), eval("level > 10"));
        assert_eq!(eval("((country == 'Turkey'))"), Ok(true));
    }

    #[test]
    fn unknown_field_fails_even_when_short_circuited() {
        let err = eval("level > 5 or nonexistent_field > 5").unwrap_err();
        assert_eq!(
            err,
            EvalError::UnknownField {
                field: "nonexistent_field".into()
            }
        );
    }

    #[test]
    fn type_mismatch_never_coerces() {
        assert!(matches!(
            eval("level == 'high'"),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert!(matches!(
            eval("level == '20'"),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn compiled_expr_reusable_across_records() {
        let compiled = crate::bind(&field("level").gte(10_i64)).unwrap();
        assert!(compiled.matches(&record()));
        let low = Record {
            level: 3,
            ..record()
        };
        assert!(!compiled.matches(&low));
    }
}
