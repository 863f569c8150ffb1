//! Input sanitization functions
//!
//! String fields are normalized before their constraints run. Every
//! sanitizer is idempotent, so a sanitized payload passes through again
//! unchanged.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pattern to match HTML tags
    static ref HTML_TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// Pattern to match multiple whitespace characters
    static ref MULTI_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Pattern to match control characters (except newline and tab)
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap();
}

/// Normalization step applied to a string field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    RemoveControlChars,
    StripHtml,
    CollapseWhitespace,
    Trim,
    Lowercase,
}

impl Sanitizer {
    /// Fixed application order, independent of declaration order
    const ORDER: [Sanitizer; 5] = [
        Sanitizer::RemoveControlChars,
        Sanitizer::StripHtml,
        Sanitizer::CollapseWhitespace,
        Sanitizer::Trim,
        Sanitizer::Lowercase,
    ];

    pub fn apply(self, value: &str) -> String {
        match self {
            Sanitizer::RemoveControlChars => remove_control_chars(value),
            Sanitizer::StripHtml => strip_html(value),
            Sanitizer::CollapseWhitespace => normalize_whitespace(value),
            Sanitizer::Trim => trim(value),
            Sanitizer::Lowercase => value.to_lowercase(),
        }
    }
}

/// Run the requested sanitizers over `value` in canonical order
pub fn apply_all(value: &str, requested: &[Sanitizer]) -> String {
    Sanitizer::ORDER
        .iter()
        .filter(|s| requested.contains(s))
        .fold(value.to_string(), |acc, s| s.apply(&acc))
}

/// Trim leading and trailing whitespace from a string
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Normalize whitespace: collapse multiple spaces/newlines into single space
pub fn normalize_whitespace(value: &str) -> String {
    MULTI_WHITESPACE.replace_all(value.trim(), " ").to_string()
}

/// Strip all HTML tags from a string
pub fn strip_html(value: &str) -> String {
    HTML_TAG_PATTERN.replace_all(value, "").to_string()
}

/// Remove control characters from a string
pub fn remove_control_chars(value: &str) -> String {
    CONTROL_CHARS.replace_all(value, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  hello  "), "hello");
        assert_eq!(trim("\n\tspaces\t\n"), "spaces");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>bold</b>"), "bold");
        assert_eq!(strip_html("<script>alert('xss')</script>"), "alert('xss')");
        assert_eq!(strip_html("no tags here"), "no tags here");
        assert_eq!(strip_html("<p>paragraph</p><br/>more"), "paragraphmore");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("hello   world"), "hello world");
        assert_eq!(normalize_whitespace("  multiple   spaces  "), "multiple spaces");
        assert_eq!(normalize_whitespace("line\n\nbreaks"), "line breaks");
    }

    #[test]
    fn test_remove_control_chars() {
        assert_eq!(remove_control_chars("hello\x00world"), "helloworld");
        assert_eq!(remove_control_chars("hello\nworld"), "hello\nworld");
    }

    #[test]
    fn test_apply_all_uses_canonical_order() {
        // Lowercase declared first still runs after stripping and collapsing
        let requested = [
            Sanitizer::Lowercase,
            Sanitizer::Trim,
            Sanitizer::CollapseWhitespace,
            Sanitizer::StripHtml,
        ];
        assert_eq!(apply_all("  Organic <b>BASMATI</b>   Rice ", &requested), "organic basmati rice");
    }

    #[test]
    fn test_apply_all_is_idempotent() {
        let requested = [
            Sanitizer::RemoveControlChars,
            Sanitizer::StripHtml,
            Sanitizer::CollapseWhitespace,
            Sanitizer::Trim,
        ];
        let once = apply_all(" a <i>b</i>\x07  <<c>d> ", &requested);
        let twice = apply_all(&once, &requested);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_request_leaves_value_alone() {
        assert_eq!(apply_all("  raw password  ", &[]), "  raw password  ");
    }
}
