//! Directive syntax scanning.
//!
//! Recognizes `(name "arg" ["arg" ...])` and rewrites matches left to right
//! without overlap.

/// A directive occurrence found in text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Occurrence<'a> {
    /// Directive name (lowercase ASCII letters).
    pub(crate) name: &'a str,
    /// Arguments with one level of escaping removed.
    pub(crate) args: Vec<String>,
    /// Byte offset of the opening parenthesis.
    pub(crate) start: usize,
    /// Byte offset just past the closing parenthesis.
    pub(crate) end: usize,
}

/// Parse a directive starting at `start`, which must point at `(`.
pub(crate) fn parse_at(text: &str, start: usize) -> Option<Occurrence<'_>> {
    let rest = text.get(start..)?.strip_prefix('(')?;
    let name_len = rest
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let name = &rest[..name_len];
    let mut pos = start + 1 + name_len;
    let mut args = Vec::new();

    loop {
        let spaced = skip_whitespace(text, &mut pos);
        match text[pos..].chars().next()? {
            ')' if !args.is_empty() => {
                return Some(Occurrence {
                    name,
                    args,
                    start,
                    end: pos + 1,
                });
            }
            '"' if spaced => {
                let (arg, next) = parse_argument(text, pos)?;
                args.push(arg);
                pos = next;
            }
            _ => return None,
        }
    }
}

/// Advance `pos` past whitespace, returning true if any was skipped.
fn skip_whitespace(text: &str, pos: &mut usize) -> bool {
    let rest = &text[*pos..];
    let trimmed = rest.trim_start();
    *pos += rest.len() - trimmed.len();
    rest.len() != trimmed.len()
}

/// Parse a quoted argument starting at the opening quote.
///
/// The argument ends at the first `"` outside nested parentheses. Escapes
/// `\"`, `\\`, `\(` and `\)` are reduced to the bare character and do not
/// count toward nesting. Returns the argument and the offset past its
/// closing quote.
fn parse_argument(text: &str, quote: usize) -> Option<(String, usize)> {
    let body = quote + 1;
    let mut out = String::new();
    let mut depth = 0usize;
    let mut chars = text[body..].char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\' | '(' | ')'))) => out.push(escaped),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            },
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            '"' if depth == 0 => return Some((out, body + i + 1)),
            _ => out.push(c),
        }
    }

    None
}

/// Rewrite every accepted occurrence, scanning left to right.
///
/// `accept` returns the replacement for an occurrence, or `None` to leave
/// it as text. Returns the rewritten text and the number of replacements.
pub(crate) fn rewrite<F>(text: &str, mut accept: F) -> (String, usize)
where
    F: FnMut(&Occurrence<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut cursor = 0;
    let mut count = 0;

    while let Some(offset) = text[cursor..].find('(') {
        let start = cursor + offset;
        let replacement = parse_at(text, start)
            .and_then(|occurrence| accept(&occurrence).map(|html| (html, occurrence.end)));

        if let Some((html, end)) = replacement {
            out.push_str(&text[copied..start]);
            out.push_str(&html);
            copied = end;
            cursor = end;
            count += 1;
        } else {
            cursor = start + 1;
        }
    }
    out.push_str(&text[copied..]);

    (out, count)
}
