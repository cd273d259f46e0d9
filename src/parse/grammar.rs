use winnow::ascii::{dec_int, multispace0};
use winnow::combinator::{alt, cut_err, not, preceded, repeat, terminated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::{CompareOp, Expr, Value};

// -- Whitespace & identifiers -----------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., is_ident_char),
    )
        .take()
        .parse_next(input)
}

/// A keyword that is not the prefix of a longer identifier.
fn keyword<'i>(word: &'static str) -> impl FnMut(&mut &'i str) -> ModalResult<&'i str> {
    move |input: &mut &'i str| terminated(word, not(one_of(is_ident_char))).parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '\''.parse_next(input)?;
    let body: &str = take_while(0.., |c: char| c != '\'').parse_next(input)?;
    cut_err('\'')
        .context(StrContext::Expected(StrContextValue::CharLiteral('\'')))
        .parse_next(input)?;
    Ok(body.to_owned())
}

fn int_literal(input: &mut &str) -> ModalResult<i64> {
    terminated(dec_int::<_, i64, _>, not(one_of(is_ident_char))).parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<Value> {
    ws.parse_next(input)?;
    alt((
        string_literal.map(Value::Str),
        int_literal.map(Value::Int),
    ))
    .context(StrContext::Expected(StrContextValue::Description("literal")))
    .parse_next(input)
}

// -- Comparison operators ---------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        ">=".value(CompareOp::Gte),
        ">".value(CompareOp::Gt),
        "<=".value(CompareOp::Lte),
        "<".value(CompareOp::Lt),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
    ))
    .parse_next(input)
}

// -- Expressions (precedence: or < and < atom) ------------------------------

fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let name = ident
        .context(StrContext::Expected(StrContextValue::Description(
            "field name or '('",
        )))
        .parse_next(input)?;
    let op = cut_err(compare_op)
        .context(StrContext::Expected(StrContextValue::Description(
            "comparison operator",
        )))
        .parse_next(input)?;
    let value = cut_err(literal).parse_next(input)?;
    Ok(Expr::Compare {
        field: name.to_owned(),
        op,
        value,
    })
}

fn group(input: &mut &str) -> ModalResult<Expr> {
    '('.parse_next(input)?;
    let inner = cut_err(or_expr).parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(')')
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(Expr::Group(Box::new(inner)))
}

fn atom(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((group, comparison)).parse_next(input)
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = atom(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("and")), cut_err(atom))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::And(Box::new(acc), Box::new(r))))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("or")), cut_err(and_expr))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::Or(Box::new(acc), Box::new(r))))
}

// -- Top-level parser -------------------------------------------------------

pub fn expression(input: &mut &str) -> ModalResult<Expr> {
    let expr = or_expr(input)?;
    ws.parse_next(input)?;
    Ok(expr)
}
