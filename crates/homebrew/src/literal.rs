//! Ruby double-quoted string literal handling.
//!
//! A value dropped between `"` delimiters in a formula is only safe when it
//! contains no `"`, no `\`, no control characters, and no interpolation
//! opener (`#{`, `#$`, `#@`).

use formulary_release::{Error, QuotePolicy, Result};

/// Whether `value` can be placed between double quotes as-is.
#[must_use]
pub fn is_literal_safe(value: &str) -> bool {
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\\' => return false,
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => return false,
            c if c.is_control() => return false,
            _ => {}
        }
    }
    true
}

/// Escapes `value` for use inside a double-quoted Ruby string.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => escaped.push_str("\\#"),
            c if c.is_control() => escaped.push_str(&format!("\\u{{{:x}}}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Prepares `value` of `field` for interpolation between double quotes.
///
/// # Errors
///
/// Under [`QuotePolicy::Strict`], returns [`Error::UnescapedQuote`] if the
/// value is not literal-safe.
pub fn quote(policy: QuotePolicy, field: &str, value: &str) -> Result<String> {
    if is_literal_safe(value) {
        return Ok(value.to_string());
    }
    match policy {
        QuotePolicy::Strict => Err(Error::unescaped_quote(field, value)),
        QuotePolicy::Escape => {
            tracing::debug!(field = %field, "Escaping field for Ruby string literal");
            Ok(escape(value))
        }
    }
}
