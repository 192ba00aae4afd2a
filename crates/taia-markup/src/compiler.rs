//! Fixed-point markup compiler.

use crate::directive::{Bold, InlineDirective, Italic, Link};
use crate::error::MarkupError;
use crate::escape::{escape_html, escape_quotes};
use crate::links::LinkResolver;
use crate::syntax::{Occurrence, rewrite};

/// Default limit on rewrite passes.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Directive name for internal links.
const INTERNAL_LINK: &str = "intl";

/// Result of compiling a description.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Compiled {
    /// Expanded HTML.
    pub html: String,
    /// Titles referenced by `(intl ...)` that did not resolve, in text order.
    pub broken_links: Vec<String>,
}

/// Compiles inline markup into HTML.
///
/// Formatting directives are rewritten pass by pass: each pass replaces
/// every leftmost, non-overlapping occurrence, and replacement text is
/// scanned again on the next pass. Compilation stops when a pass finds
/// nothing to replace, or fails after `max_passes`.
pub struct MarkupCompiler {
    directives: Vec<Box<dyn InlineDirective>>,
    max_passes: usize,
}

impl Default for MarkupCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupCompiler {
    /// Create a compiler with `bold`, `ital` and `link`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directives: vec![Box::new(Bold), Box::new(Italic), Box::new(Link)],
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Set the pass limit. A limit of zero is treated as one.
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Register an additional directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl InlineDirective + 'static) -> Self {
        self.directives.push(Box::new(directive));
        self
    }

    fn directive_for(&self, occurrence: &Occurrence<'_>) -> Option<&dyn InlineDirective> {
        self.directives
            .iter()
            .map(Box::as_ref)
            .find(|d| d.name() == occurrence.name && d.accepts(occurrence.args.len()))
    }

    /// Run one rewrite pass. Returns `None` if nothing matched.
    fn expand_once(&self, text: &str) -> Option<String> {
        let (out, count) = rewrite(text, |occurrence| {
            self.directive_for(occurrence)
                .map(|directive| directive.render(&occurrence.args))
        });
        (count > 0).then_some(out)
    }

    /// Expand formatting directives to a fixed point.
    ///
    /// Internal links are left untouched; see [`expand_internal_links`](Self::expand_internal_links).
    pub fn compile(&self, text: &str) -> Result<String, MarkupError> {
        let mut current = text.to_owned();

        for pass in 0..self.max_passes {
            match self.expand_once(&current) {
                Some(next) => current = next,
                None => {
                    tracing::trace!(passes = pass, "Markup settled");
                    return Ok(current);
                }
            }
        }

        let (_, remaining) = rewrite(&current, |occurrence| {
            self.directive_for(occurrence).map(|_| String::new())
        });
        if remaining == 0 {
            return Ok(current);
        }

        Err(MarkupError::ExpansionLimit {
            passes: self.max_passes,
            remaining,
        })
    }

    /// Replace `(intl "Title")` with links in a single pass.
    ///
    /// Unresolved titles become `<span class="missing-link">` and are
    /// reported in [`Compiled::broken_links`].
    pub fn expand_internal_links(&self, text: &str, resolver: &dyn LinkResolver) -> Compiled {
        let mut broken_links = Vec::new();

        let (html, _) = rewrite(text, |occurrence| {
            if occurrence.name != INTERNAL_LINK || occurrence.args.len() != 1 {
                return None;
            }
            let title = &occurrence.args[0];
            let replacement = if let Some(url) = resolver.resolve(title) {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape_quotes(&url),
                    escape_html(title)
                )
            } else {
                broken_links.push(title.clone());
                format!("<span class=\"missing-link\">{}</span>", escape_html(title))
            };
            Some(replacement)
        });

        Compiled { html, broken_links }
    }

    /// Compile formatting directives, then expand internal links.
    pub fn render(&self, text: &str, resolver: &dyn LinkResolver) -> Result<Compiled, MarkupError> {
        let html = self.compile(text)?;
        Ok(self.expand_internal_links(&html, resolver))
    }
}
