//! Record store notations.
//!
//! A [`Notation`] splits raw text into records and renders entries back.
//! Field validation is shared between notations so both produce the same
//! [`Entry`] for equivalent input.

mod block;
mod tagged;

pub use block::BlockNotation;
pub use tagged::TaggedNotation;

use crate::entry::Entry;
use crate::error::ParseError;

/// A textual notation for the record store.
pub trait Notation: Send + Sync {
    /// Short notation name for logs.
    fn name(&self) -> &'static str;

    /// Split text into entries, in source order.
    ///
    /// Each entry is paired with the line its record starts on. Title
    /// uniqueness is checked by the caller.
    fn entries(&self, text: &str) -> Result<Vec<(usize, Entry)>, ParseError>;

    /// Render entries back into this notation.
    ///
    /// Parsing the output yields entries with the same field values.
    fn render(&self, entries: &[Entry]) -> String;
}

/// Notation selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotationKind {
    /// Tagged if the first non-blank line starts with `TITL:` at column 0,
    /// block otherwise.
    #[default]
    Auto,
    /// Blank-line separated `key: value` blocks.
    Block,
    /// `TITL:` / `UNDE:` / `DESC:` marker sequences.
    Tagged,
}

impl NotationKind {
    /// Resolve to a concrete notation for the given text.
    #[must_use]
    pub fn resolve(self, text: &str) -> &'static dyn Notation {
        match self {
            Self::Block => &BlockNotation,
            Self::Tagged => &TaggedNotation,
            Self::Auto => {
                let first = text.lines().find(|l| !l.trim().is_empty());
                if first.is_some_and(|l| l.starts_with(tagged::TITLE_MARKER)) {
                    &TaggedNotation
                } else {
                    &BlockNotation
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_detects_tagged() {
        let notation = NotationKind::Auto.resolve("\n\nTITL: Home\nDESC: x\n");
        assert_eq!(notation.name(), "tagged");
    }

    #[test]
    fn test_auto_requires_marker_at_line_start() {
        let notation = NotationKind::Auto.resolve("  TITL: A\n");
        assert_eq!(notation.name(), "block");
    }

    #[test]
    fn test_auto_defaults_to_block() {
        assert_eq!(NotationKind::Auto.resolve("title: Home\n").name(), "block");
        assert_eq!(NotationKind::Auto.resolve("").name(), "block");
    }

    #[test]
    fn test_explicit_kind_ignores_content() {
        let notation = NotationKind::Block.resolve("TITL: Home\n");
        assert_eq!(notation.name(), "block");
    }
}
