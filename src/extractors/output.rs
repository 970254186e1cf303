// src/extractors/output.rs

// --- Imports ---
use crate::extractors::attribute::{coerce, normalize_key, TypedAttribute};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// pdfinfo separates field name and value with a colon and padding spaces.
// Colons inside values (e.g. "10:00:00") are not followed by whitespace.
static KEY_VALUE_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":\s+").expect("Failed to compile KEY_VALUE_SEPARATOR_RE")
});

/// Splits one output line into `(key, value)` at the first colon-plus-whitespace.
///
/// Returns `None` when there is no separator or either side is empty.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = KEY_VALUE_SEPARATOR_RE.splitn(line, 2);
    let key = parts.next()?;
    let value = parts.next()?;

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parses the full stdout of one pdfinfo run.
///
/// `None` means the tool printed nothing at all, which is how pdfinfo reacts to
/// input it cannot open as a PDF. `Some(vec![])` means it printed something but
/// no line looked like an attribute.
pub fn parse(text: &str) -> Option<Vec<TypedAttribute>> {
    if text.is_empty() {
        return None;
    }

    let attributes = text
        .lines()
        .filter_map(split_line)
        .map(|(key, value)| coerce(&normalize_key(key), value))
        .collect::<Vec<_>>();

    tracing::trace!("Parsed {} attributes from {} bytes of output", attributes.len(), text.len());
    Some(attributes)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::attribute::TypedValue;

    const SAMPLE: &str = "Title:          basic\n\
Producer:       pdfTeX-1.40.21\n\
CreationDate:   Thu Jan  7 10:12:13 2021 CET\n\
ModDate:        Thu Jan  7 10:12:13 2021 CET\n\
Tagged:         no\n\
UserProperties: no\n\
Form:           none\n\
Pages:          3\n\
Encrypted:      no\n\
Page size:      595.276 x 841.89 pts (A4)\n\
PDF version:    1.5\n";

    #[test]
    fn empty_output_is_the_no_content_signal() {
        assert!(parse("").is_none());
    }

    #[test]
    fn output_without_attributes_is_an_empty_sequence() {
        assert_eq!(parse("\n\nSyntax Warning\n"), Some(vec![]));
    }

    #[test]
    fn parses_pdfinfo_output_in_line_order() {
        let attrs = parse(SAMPLE).unwrap();
        let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "title", "producer", "created", "modified", "tagged", "userproperties",
                "form", "pages", "encrypted", "page_size", "pdf_version",
            ]
        );
        assert_eq!(attrs[0].value, TypedValue::String("basic".to_string()));
        assert_eq!(attrs[2].value.as_str(), Some("Thu Jan  7 10:12:13 2021 CET"));
        assert_eq!(attrs[4].value, TypedValue::Bool(false));
        assert!(attrs[6].value.is_null());
        assert_eq!(attrs[7].value.as_i64(), Some(3));
        assert_eq!(attrs[10].value.as_f64(), Some(1.5));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let attrs = parse("no separator here\n: orphan value\nKey:\nKey:novalue\nAuthor: Jane\n").unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, "author");
    }

    #[test]
    fn splits_only_at_first_separator() {
        assert_eq!(split_line("Title: a: b"), Some(("Title", "a: b")));
        assert_eq!(split_line("Time:10:00: x"), Some(("Time:10:00", "x")));
        assert_eq!(split_line("Key:   "), None);
    }

    #[test]
    fn handles_crlf_output() {
        let attrs = parse("Pages: 2\r\nTagged: no\r\n").unwrap();
        assert_eq!(attrs[0].value.as_i64(), Some(2));
        assert_eq!(attrs[1].value, TypedValue::Bool(false));
    }
}
