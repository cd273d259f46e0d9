//! Rewriting of SQL-flavored rule text into the canonical form accepted by
//! [`parse`](crate::parse()).
//!
//! In one left-to-right pass, outside single-quoted literals:
//!
//! * the nullary call `_now()` becomes the decimal text of `now`
//! * the keywords `AND` / `OR` (any casing, whole words only) become `and` / `or`
//! * `<>` becomes `!=`
//! * a bare `=` (not part of `==`, `!=`, `<=`, `>=`) becomes `==`
//!
//! Normalization never fails. Anything it cannot make sense of is copied
//! through unchanged and left for the parser to report.

/// Rewrite `raw` into canonical form, substituting `now` for every `_now()`.
#[must_use]
pub fn normalize(raw: &str, now: i64) -> String {
    normalize_rule(raw, now).text
}

/// Canonical text plus whether it depends on the time sample.
pub(crate) struct Normalized {
    pub(crate) text: String,
    pub(crate) uses_now: bool,
}

pub(crate) fn normalize_rule(raw: &str, now: i64) -> Normalized {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut chars = raw.char_indices().peekable();
    let mut in_quote = false;
    let mut uses_now = false;

    while let Some((start, c)) = chars.next() {
        if in_quote {
            out.push(c);
            if c == '\'' {
                in_quote = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_quote = true;
                out.push(c);
            }
            c if is_word_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                let word = &raw[start..end];
                if word == "_now" && raw[end..].starts_with("()") {
                    chars.next();
                    chars.next();
                    out.push_str(&now.to_string());
                    uses_now = true;
                } else if word.eq_ignore_ascii_case("and") {
                    out.push_str("and");
                } else if word.eq_ignore_ascii_case("or") {
                    out.push_str("or");
                } else {
                    out.push_str(word);
                }
            }
            '<' if chars.peek().is_some_and(|&(_, next)| next == '>') => {
                chars.next();
                out.push_str("!=");
            }
            '=' => {
                let after_op = matches!(out.chars().next_back(), Some('<' | '>' | '!' | '='));
                let before_eq = chars.peek().is_some_and(|&(_, next)| next == '=');
                if after_op || before_eq {
                    out.push('=');
                } else {
                    out.push_str("==");
                }
            }
            _ => out.push(c),
        }
    }

    Normalized {
        text: out,
        uses_now,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_735_689_600;

    #[test]
    fn bare_equals_promoted() {
        assert_eq!(normalize("country = 'Turkey'", NOW), "country == 'Turkey'");
        assert_eq!(normalize("level=5", NOW), "level==5");
    }

    #[test]
    fn compound_operators_untouched() {
        for op in ["==", "!=", "<=", ">=", "<", ">"] {
            let text = format!("level {op} 5");
            assert_eq!(normalize(&text, NOW), text, "{op}");
        }
    }

    #[test]
    fn not_equal_sql_form() {
        assert_eq!(normalize("level <> 5", NOW), "level != 5");
        assert_eq!(normalize("level<>5", NOW), "level!=5");
    }

    #[test]
    fn keywords_case_folded() {
        assert_eq!(
            normalize("level > 1 AND level < 9 Or country = 'X'", NOW),
            "level > 1 and level < 9 or country == 'X'"
        );
        assert_eq!(normalize("a > 1 aNd b > 2", NOW), "a > 1 and b > 2");
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert_eq!(normalize("brand = 'x'", NOW), "brand == 'x'");
        assert_eq!(normalize("ORDERS > 1", NOW), "ORDERS > 1");
        assert_eq!(normalize("ANDROID = 1 OR x_or > 2", NOW), "ANDROID == 1 or x_or > 2");
    }

    #[test]
    fn now_substituted() {
        assert_eq!(
            normalize("last_session < _now()", NOW),
            "last_session < 1735689600"
        );
        assert_eq!(
            normalize("first_session>_now() OR last_session<_now()", 7),
            "first_session>7 or last_session<7"
        );
    }

    #[test]
    fn reports_time_dependence() {
        assert!(normalize_rule("last_session < _now()", NOW).uses_now);
        assert!(!normalize_rule("level > 10", NOW).uses_now);
        assert!(!normalize_rule("country = '_now()'", NOW).uses_now);
        assert!(!normalize_rule("level > x_now()", NOW).uses_now);
    }

    #[test]
    fn now_needs_call_parens() {
        assert_eq!(normalize("level > _now", NOW), "level > _now");
        assert_eq!(normalize("level > x_now()", NOW), "level > x_now()");
    }

    #[test]
    fn quoted_spans_untouched() {
        assert_eq!(
            normalize("country = 'A AND B = C <> _now()'", NOW),
            "country == 'A AND B = C <> _now()'"
        );
        assert_eq!(
            normalize("country = 'Or' OR country = 'and'", NOW),
            "country == 'Or' or country == 'and'"
        );
    }

    #[test]
    fn unterminated_quote_copied_verbatim() {
        assert_eq!(normalize("country = 'A AND", NOW), "country == 'A AND");
    }

    #[test]
    fn overlapping_equals_single_pass() {
        assert_eq!(normalize("a === 1", NOW), "a === 1");
        assert_eq!(normalize("a = = 1", NOW), "a == == 1");
        assert_eq!(normalize("a <>= 1", NOW), "a !== 1");
    }

    #[test]
    fn idempotent_without_time_function() {
        let once = normalize("country = 'Turkey' AND level <> 10", NOW);
        assert_eq!(normalize(&once, NOW), once);
    }

    #[test]
    fn non_ascii_passthrough() {
        assert_eq!(normalize("country = 'Türkiye'", NOW), "country == 'Türkiye'");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize("", NOW), "");
    }
}
