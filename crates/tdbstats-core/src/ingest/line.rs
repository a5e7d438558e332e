//! Parsing of the line-oriented input format
//!
//! One record per line: fields separated by a configurable separator, the
//! first field an integer timestamp, the remaining non-empty fields items.

use crate::error::{Error, Result};

/// Fields extracted from one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLine {
    pub timestamp: i64,
    pub items: Vec<String>,
}

/// Parse a raw line. Returns `None` when the line has no fields at all.
pub(crate) fn parse_line(raw: &str, separator: &str, line: usize) -> Result<Option<ParsedLine>> {
    let mut fields = raw
        .split(separator)
        .map(str::trim_end)
        .filter(|field| !field.is_empty());

    let Some(first) = fields.next() else {
        return Ok(None);
    };

    let timestamp = parse_timestamp(first, line)?;
    let items = fields.map(str::to_string).collect();

    Ok(Some(ParsedLine { timestamp, items }))
}

fn parse_timestamp(field: &str, line: usize) -> Result<i64> {
    field.trim_start().parse::<i64>().map_err(|e| Error::Parse {
        line,
        message: format!("invalid timestamp '{}': {}", field, e),
    })
}

/// The first character of the raw line read as a decimal digit.
///
/// Used by [`TimestampKeying::LeadingCharacter`](super::TimestampKeying).
pub(crate) fn leading_digit(raw: &str, line: usize) -> Result<i64> {
    raw.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(i64::from)
        .ok_or_else(|| Error::Parse {
            line,
            message: format!(
                "leading-character keying needs a digit at the start of the line, found {:?}",
                raw.chars().next()
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_separated_line() {
        let parsed = parse_line("1\ta\td\te", "\t", 1).unwrap().unwrap();
        assert_eq!(parsed.timestamp, 1);
        assert_eq!(parsed.items, vec!["a", "d", "e"]);
    }

    #[test]
    fn test_trailing_whitespace_and_empty_fields_dropped() {
        let parsed = parse_line("12 \ta  \t\t b\t\r", "\t", 4).unwrap().unwrap();
        assert_eq!(parsed.timestamp, 12);
        // only trailing whitespace is trimmed
        assert_eq!(parsed.items, vec!["a", " b"]);
    }

    #[test]
    fn test_custom_separator() {
        let parsed = parse_line("3,x,y,x", ",", 1).unwrap().unwrap();
        assert_eq!(parsed.timestamp, 3);
        assert_eq!(parsed.items, vec!["x", "y", "x"]);
    }

    #[test]
    fn test_timestamp_only_line_has_no_items() {
        let parsed = parse_line("9", "\t", 1).unwrap().unwrap();
        assert_eq!(parsed.timestamp, 9);
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_blank_line_yields_none() {
        assert_eq!(parse_line("", "\t", 1).unwrap(), None);
        assert_eq!(parse_line("  \t \t", "\t", 1).unwrap(), None);
    }

    #[test]
    fn test_invalid_timestamp_reports_line() {
        let err = parse_line("abc\tx", "\t", 7).unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 7);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(leading_digit("42\ta", 1).unwrap(), 4);
        assert!(leading_digit("x1\ta", 1).is_err());
        assert!(leading_digit("", 1).is_err());
    }
}
