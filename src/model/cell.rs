//! Numeric interpretation of text cells under a decimal mark convention

use std::borrow::Cow;

use super::separator::{DecimalMark, SeparatorPolicy};

/// Strictly parse `cell` as a decimal number written with `mark`.
///
/// Accepts surrounding whitespace, an optional leading sign, ASCII digits and
/// at most one decimal mark. Grouping symbols, exponents and currency signs
/// are rejected.
fn parse_with_mark(cell: &str, mark: DecimalMark) -> Option<f64> {
    let trimmed = cell.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    let mark = mark.as_char();
    let mut digits = 0usize;
    let mut marks = 0usize;
    for c in unsigned.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == mark {
            marks += 1;
        } else {
            return None;
        }
    }
    if digits == 0 || marks > 1 {
        return None;
    }

    trimmed.replace(mark, ".").parse::<f64>().ok()
}

/// Parse `cell` using the active decimal mark only
pub fn parse_number(cell: &str, policy: &SeparatorPolicy) -> Option<f64> {
    parse_with_mark(cell, policy.decimal_mark())
}

/// Interpret `cell` as a number, repairing a foreign decimal mark first.
///
/// On success the normalized text is written back into `cell`; on failure
/// `cell` is left as it was.
pub fn to_nullable_number(cell: &mut String, policy: &SeparatorPolicy) -> Option<f64> {
    let active = policy.decimal_mark().as_char();
    let other = policy.other_decimal_mark().as_char();
    let normalized = cell.replace(other, &active.to_string());

    let value = parse_number(&normalized, policy)?;
    *cell = normalized;
    Some(value)
}

/// Apply [`to_nullable_number`] to every cell of a sequence
pub fn to_nullable_numbers(cells: &mut [String], policy: &SeparatorPolicy) -> Vec<Option<f64>> {
    cells
        .iter_mut()
        .map(|cell| to_nullable_number(cell, policy))
        .collect()
}

/// Rewrite a number typed with the other decimal mark into the active one.
///
/// Integers and non-numeric text are returned untouched.
pub fn normalize_decimal_mark<'a>(cell: &'a str, policy: &SeparatorPolicy) -> Cow<'a, str> {
    if cell.trim().parse::<i64>().is_ok() {
        return Cow::Borrowed(cell);
    }

    let other = policy.other_decimal_mark();
    if parse_with_mark(cell, other).is_some() {
        let active = policy.decimal_mark().as_char().to_string();
        return Cow::Owned(cell.replace(other.as_char(), &active));
    }

    Cow::Borrowed(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::separator::FieldSeparator;

    fn period() -> SeparatorPolicy {
        SeparatorPolicy::new(FieldSeparator::Comma)
    }

    fn comma() -> SeparatorPolicy {
        SeparatorPolicy::new(FieldSeparator::Semicolon)
    }

    #[test]
    fn test_parse_number_strict() {
        let policy = period();
        assert_eq!(parse_number(" -1.5 ", &policy), Some(-1.5));
        assert_eq!(parse_number("+3", &policy), Some(3.0));
        assert_eq!(parse_number(".5", &policy), Some(0.5));
        assert_eq!(parse_number("1.2.3", &policy), None);
        assert_eq!(parse_number("1,5", &policy), None);
        assert_eq!(parse_number("1e3", &policy), None);
        assert_eq!(parse_number("$4", &policy), None);
        assert_eq!(parse_number("-", &policy), None);
        assert_eq!(parse_number("", &policy), None);
    }

    #[test]
    fn test_to_nullable_numbers_normalizes_in_place() {
        let policy = period();
        let mut cells = vec!["1.5".to_string(), "abc".to_string(), "2,5".to_string()];

        let numbers = to_nullable_numbers(&mut cells, &policy);

        assert_eq!(numbers, vec![Some(1.5), None, Some(2.5)]);
        assert_eq!(cells, vec!["1.5", "abc", "2.5"]);
    }

    #[test]
    fn test_to_nullable_number_leaves_text_on_failure() {
        let policy = comma();
        let mut cell = "a.b".to_string();
        assert_eq!(to_nullable_number(&mut cell, &policy), None);
        assert_eq!(cell, "a.b");

        let mut cell = "7.25".to_string();
        assert_eq!(to_nullable_number(&mut cell, &policy), Some(7.25));
        assert_eq!(cell, "7,25");
    }

    #[test]
    fn test_normalize_decimal_mark() {
        let policy = period();
        assert_eq!(normalize_decimal_mark("3,14", &policy), "3.14");
        assert_eq!(normalize_decimal_mark("3.14", &policy), "3.14");
        assert_eq!(normalize_decimal_mark("hello", &policy), "hello");
        assert_eq!(normalize_decimal_mark("42", &policy), "42");
        assert_eq!(normalize_decimal_mark("1,2,3", &policy), "1,2,3");

        let policy = comma();
        assert_eq!(normalize_decimal_mark("-0.75", &policy), "-0,75");
    }
}
