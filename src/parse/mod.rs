mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Maximum parenthesis nesting accepted by [`parse`].
pub const MAX_NESTING: usize = 64;

/// Maximum number of comparisons joined by `and` / `or` in one rule.
pub const MAX_TERMS: usize = 256;

/// Parse canonical rule text (the output of [`normalize`](crate::normalize))
/// into an [`Expr`].
///
/// # Errors
///
/// Returns [`ParseError`] carrying the character offset of the offending
/// input if the text is not a valid expression, or if it nests deeper than
/// [`MAX_NESTING`] or chains more than [`MAX_TERMS`] comparisons.
pub fn parse(canonical: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;

    check_limits(canonical)?;
    grammar::expression.parse(canonical).map_err(|e| {
        let offset = e.offset();
        ParseError::new(
            char_offset(canonical, offset),
            describe(canonical, offset, &e.inner().to_string()),
        )
    })
}

/// Convert a byte offset into `input` to a character offset.
fn char_offset(input: &str, byte: usize) -> usize {
    input.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}

fn describe(input: &str, offset: usize, expected: &str) -> String {
    let found = match input.get(offset..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("unexpected '{c}'"),
        None => "unexpected end of input".to_owned(),
    };
    let expected = expected.trim().replace('\n', ", ");
    if expected.is_empty() {
        found
    } else {
        format!("{found}, {expected}")
    }
}

/// Reject inputs whose tree would be too deep to walk recursively: group
/// nesting past [`MAX_NESTING`], or more than [`MAX_TERMS`] comparisons.
/// Text inside quoted literals is ignored.
fn check_limits(input: &str) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    let mut terms = 1_usize;
    let mut in_quote = false;
    let mut chars = input.chars().enumerate().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\'' => in_quote = !in_quote,
            _ if in_quote => {}
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::new(
                        offset,
                        format!("parentheses nested deeper than {MAX_NESTING}"),
                    ));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            c if is_word_char(c) => {
                let mut word = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                if word == "and" || word == "or" {
                    terms += 1;
                    if terms > MAX_TERMS {
                        while chars.next_if(|&(_, next)| next.is_whitespace()).is_some() {}
                        let at = chars.peek().map_or(input.chars().count(), |&(i, _)| i);
                        return Err(ParseError::new(
                            at,
                            format!("more than {MAX_TERMS} comparisons in one rule"),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
