//! HTML escaping.

/// Escape HTML special characters for text and attribute contexts.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape double quotes for an attribute value that may carry HTML.
pub(crate) fn escape_quotes(s: &str) -> String {
    s.replace('"', "&quot;")
}
