//! Minimal escaping for the block-structured report format.

use std::borrow::Cow;

/// Escapes a value for embedding in a `key: value` line of the report.
///
/// The rules are deliberately minimal and format-specific, not general
/// quoting. A value containing a double quote is wrapped in single quotes
/// with no inner escaping; otherwise a value containing the `": "`
/// separator sequence is wrapped in double quotes; anything else passes
/// through unchanged. The quote check runs before the separator check.
pub fn escape(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("'{}'", s))
    } else if s.contains(": ") {
        Cow::Owned(format!("\"{}\"", s))
    } else {
        Cow::Borrowed(s)
    }
}
