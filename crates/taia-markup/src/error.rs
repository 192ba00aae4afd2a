//! Markup error types.

/// Error returned when markup cannot be fully expanded.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// Directives were still present after the pass limit.
    #[error("Markup did not settle after {passes} passes ({remaining} directives left)")]
    ExpansionLimit {
        /// Number of passes performed.
        passes: usize,
        /// Directives still matching after the last pass.
        remaining: usize,
    },
}
