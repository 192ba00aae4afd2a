//! Build error types.

use taia_markup::MarkupError;
use taia_site::TreeError;
use taia_store::ParseError;

/// Error returned by the static site builder.
///
/// Every variant except [`BuildError::Io`] is raised before any output is
/// written.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The record store could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Parent references do not form a forest.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A description did not settle within the pass limit.
    #[error("Markup error in \"{title}\": {source}")]
    Markup {
        /// Entry owning the description.
        title: String,
        /// Underlying compiler error.
        source: MarkupError,
    },
    /// The search index could not be serialized.
    #[error("Search index serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// A generated path would leave the output directory.
    #[error("Output path {path} is not inside the output directory")]
    UnsafePath {
        /// Offending relative path.
        path: String,
    },
    /// Writing an output file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Relative output path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
