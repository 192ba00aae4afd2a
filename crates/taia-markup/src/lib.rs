//! Inline markup compiler for taia entry descriptions.
//!
//! Descriptions use a small parenthesized notation:
//!
//! - `(bold "text")` becomes `<strong>text</strong>`
//! - `(ital "text")` becomes `<em>text</em>`
//! - `(link "target" "label")` becomes `<a href="target">label</a>` (label optional)
//! - `(intl "Page Title")` becomes a link to that page's URL
//!
//! Directives nest inside each other's arguments. [`MarkupCompiler::compile`]
//! rewrites the text pass by pass until no directive is left, with a pass
//! limit that turns runaway input into [`MarkupError::ExpansionLimit`].
//!
//! # Authoring constraints
//!
//! An argument ends at the first `"` outside nested parentheses. Quotes
//! inside an argument must be written as `\"`, backslashes as `\\`, and
//! unbalanced parentheses as `\(` / `\)`. Each pass removes one level of
//! escaping, so `(bold "(ital \"x\")")` expands in two passes.
//!
//! # Example
//!
//! ```
//! use taia_markup::MarkupCompiler;
//!
//! let compiler = MarkupCompiler::new();
//! let html = compiler.compile(r#"(bold "(ital \"x\")")"#)?;
//! assert_eq!(html, "<strong><em>x</em></strong>");
//! # Ok::<(), taia_markup::MarkupError>(())
//! ```
//!
//! Everything outside directives passes through untouched, literal HTML included.

mod compiler;
mod directive;
mod error;
mod escape;
mod links;
mod syntax;

pub use compiler::{Compiled, DEFAULT_MAX_PASSES, MarkupCompiler};
pub use directive::{Bold, InlineDirective, Italic, Link};
pub use error::MarkupError;
pub use escape::escape_html;
pub use links::{LinkResolver, NoLinks};
