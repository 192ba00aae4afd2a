//! Non-fatal build conditions.

use std::fmt;

/// A problem that does not stop the build.
///
/// Warnings are collected while building and reported after the build
/// succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// An entry names a parent that does not exist; it is treated as a master page.
    DanglingParent {
        /// Entry with the unresolved parent.
        title: String,
        /// The missing parent title.
        parent: String,
    },
    /// `(intl "...")` names a page that does not exist.
    BrokenInternalLink {
        /// Entry whose description holds the link.
        source: String,
        /// The missing target title.
        target: String,
    },
    /// A page slug collided with a reserved output name and was renamed.
    ReservedPath {
        /// Page title.
        title: String,
        /// URL used instead.
        url: String,
    },
    /// Two titles produced the same slug; the later one was renamed.
    SlugCollision {
        /// Page title that was renamed.
        title: String,
        /// URL used instead.
        url: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingParent { title, parent } => write!(
                f,
                "\"{title}\" has unknown parent \"{parent}\"; treated as a master page"
            ),
            Self::BrokenInternalLink { source, target } => {
                write!(f, "\"{source}\" links to unknown page \"{target}\"")
            }
            Self::ReservedPath { title, url } => {
                write!(f, "\"{title}\" uses a reserved file name; written to {url}")
            }
            Self::SlugCollision { title, url } => {
                write!(f, "\"{title}\" has the same file name as another page; written to {url}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_dangling_parent() {
        let warning = Warning::DanglingParent {
            title: "Child".to_owned(),
            parent: "Ghost".to_owned(),
        };
        assert_eq!(
            warning.to_string(),
            "\"Child\" has unknown parent \"Ghost\"; treated as a master page"
        );
    }
}
