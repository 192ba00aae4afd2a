//! Parse error types.

/// Error returned when record text cannot be turned into entries.
///
/// Parsing stops at the first error; no partial entry list is returned.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A record is structurally invalid or lacks a required field.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number where the problem was detected.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Two tree entries share a title.
    #[error("Duplicate title \"{title}\" (lines {first_line} and {line})")]
    DuplicateTitle {
        /// The offending title.
        title: String,
        /// Line of the record that first used the title.
        first_line: usize,
        /// Line of the record that repeated it.
        line: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
