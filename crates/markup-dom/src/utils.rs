//! Utility functions for markup rendering

/// Escape `"` for use inside a double-quoted attribute value
///
/// Nothing else is touched; callers own the rest of the value.
pub fn escape_attribute_value(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Escape text content (`&`, `<`, `>`)
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keep comment content from closing the comment early
///
/// `-->` and `--!>` have their `>` written as `&gt;`; everything else is
/// emitted as-is.
pub fn escape_comment(content: &str) -> String {
    content.replace("--!>", "--!&gt;").replace("-->", "--&gt;")
}

/// Check that `name` can stand as an attribute name in an opening tag
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')
        })
}

/// Check that `token` is a single class token (non-empty, no whitespace)
pub fn is_class_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(|c| c.is_ascii_whitespace())
}
