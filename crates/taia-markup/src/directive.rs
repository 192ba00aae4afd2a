//! Inline directive trait and the built-in formatting directives.

use crate::escape::escape_quotes;

/// Handler for an inline directive: `(name "arg" ...)`.
///
/// Handlers are stateless; the compiler may call them many times per pass.
///
/// # Example
///
/// ```
/// use taia_markup::{InlineDirective, MarkupCompiler};
///
/// struct Kbd;
///
/// impl InlineDirective for Kbd {
///     fn name(&self) -> &str { "kbd" }
///     fn accepts(&self, arg_count: usize) -> bool { arg_count == 1 }
///     fn render(&self, args: &[String]) -> String {
///         format!("<kbd>{}</kbd>", args[0])
///     }
/// }
///
/// let compiler = MarkupCompiler::new().with_directive(Kbd);
/// assert_eq!(compiler.compile(r#"(kbd "Esc")"#).unwrap(), "<kbd>Esc</kbd>");
/// ```
pub trait InlineDirective: Send + Sync {
    /// Directive name, matched against `(name ...`.
    fn name(&self) -> &str;

    /// Whether the directive takes `arg_count` arguments.
    ///
    /// Occurrences with other arities are left as text.
    fn accepts(&self, arg_count: usize) -> bool;

    /// Produce the replacement HTML.
    ///
    /// `args` has a length for which [`accepts`](Self::accepts) returned true.
    fn render(&self, args: &[String]) -> String;
}

/// `(bold "text")` to `<strong>text</strong>`.
pub struct Bold;

impl InlineDirective for Bold {
    fn name(&self) -> &str {
        "bold"
    }

    fn accepts(&self, arg_count: usize) -> bool {
        arg_count == 1
    }

    fn render(&self, args: &[String]) -> String {
        format!("<strong>{}</strong>", args[0])
    }
}

/// `(ital "text")` to `<em>text</em>`.
pub struct Italic;

impl InlineDirective for Italic {
    fn name(&self) -> &str {
        "ital"
    }

    fn accepts(&self, arg_count: usize) -> bool {
        arg_count == 1
    }

    fn render(&self, args: &[String]) -> String {
        format!("<em>{}</em>", args[0])
    }
}

/// `(link "target" ["label"])` to `<a href="target">label</a>`.
///
/// Without a label the target doubles as link text.
pub struct Link;

impl InlineDirective for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn accepts(&self, arg_count: usize) -> bool {
        matches!(arg_count, 1 | 2)
    }

    fn render(&self, args: &[String]) -> String {
        let target = &args[0];
        let label = args.get(1).unwrap_or(target);
        format!("<a href=\"{}\">{label}</a>", escape_quotes(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_bold() {
        assert_eq!(Bold.render(&args(&["hi"])), "<strong>hi</strong>");
        assert!(!Bold.accepts(2));
    }

    #[test]
    fn test_italic() {
        assert_eq!(Italic.render(&args(&["hi"])), "<em>hi</em>");
    }

    #[test]
    fn test_link_with_label() {
        assert_eq!(
            Link.render(&args(&["https://example.com", "Example"])),
            "<a href=\"https://example.com\">Example</a>"
        );
    }

    #[test]
    fn test_link_without_label() {
        assert_eq!(
            Link.render(&args(&["map.html"])),
            "<a href=\"map.html\">map.html</a>"
        );
        assert!(Link.accepts(1));
        assert!(Link.accepts(2));
        assert!(!Link.accepts(3));
    }
}
