//! Text escaping helpers shared by element resolution
//!
//! The caret placeholder is a reserved token marking where the cursor should
//! end up once the expanded markup is inserted. A later stage swaps it for the
//! editor's real cursor; this crate only ever produces it.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved marker standing in for the final cursor position
pub const CARET_PLACEHOLDER: &str = "{%::caret::%}";

/// Delimiter that marks a caret position in user-supplied text
pub const CARET_DELIMITER: char = '|';

/// Opening, closing or self-closing tag, with optional attributes
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"</?[\w:\-]+(?:\s+[\w\-:]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^>\s]+))?)*\s*/?>"#,
    )
    .unwrap()
});

/// Get the caret placeholder token
pub fn caret_placeholder() -> &'static str {
    CARET_PLACEHOLDER
}

/// Replace unescaped `delimiter` characters with `replacement`
///
/// A backslash directly in front of the delimiter escapes it: the backslash is
/// dropped and the delimiter is kept as a literal character. Backslashes in
/// front of anything else are left alone.
pub fn escape_delimiter(text: &str, delimiter: char, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&delimiter) {
            result.push(delimiter);
            chars.next();
        } else if ch == delimiter {
            result.push_str(replacement);
        } else {
            result.push(ch);
        }
    }

    result
}

/// Turn caret delimiters (`|`) into the caret placeholder
pub fn escape_caret(text: &str) -> String {
    escape_delimiter(text, CARET_DELIMITER, CARET_PLACEHOLDER)
}

/// Check whether text contains something that looks like a markup tag
pub fn contains_tags(text: &str) -> bool {
    TAG_REGEX.is_match(text)
}

/// Escape text meant for literal insertion so it is never read as markup
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
