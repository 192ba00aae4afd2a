//! Rendered output and build summary.

use taia_site::Warning;

use crate::error::BuildError;
use crate::sink::{OutputSink, is_contained};

/// One generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the output directory.
    pub path: String,
    /// File contents.
    pub contents: Vec<u8>,
}

impl OutputFile {
    pub(crate) fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Summary of a successful build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Entries read from the record store.
    pub entries: usize,
    /// Tree pages generated.
    pub pages: usize,
    /// Feed pages generated (at least one).
    pub feed_pages: usize,
    /// Tag listing pages generated.
    pub tag_pages: usize,
    /// Non-fatal conditions found while building.
    pub warnings: Vec<Warning>,
}

impl BuildReport {
    /// Total number of files, including the search index.
    #[must_use]
    pub fn files(&self) -> usize {
        self.pages + self.feed_pages + self.tag_pages + 1
    }
}

/// A fully rendered site held in memory.
///
/// Produced only when every stage succeeded, so writing it never leaves a
/// half-built site because of a content error.
#[derive(Debug)]
pub struct RenderedSite {
    files: Vec<OutputFile>,
    report: BuildReport,
}

impl RenderedSite {
    pub(crate) fn new(files: Vec<OutputFile>, report: BuildReport) -> Self {
        Self { files, report }
    }

    /// Files in write order.
    #[must_use]
    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    /// Contents of `path` as UTF-8.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .and_then(|f| std::str::from_utf8(&f.contents).ok())
    }

    /// Build summary.
    #[must_use]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Consume the site, keeping only the summary.
    #[must_use]
    pub fn into_report(self) -> BuildReport {
        self.report
    }

    /// Write every file to `sink`, in order.
    ///
    /// All paths are checked before the first write.
    pub fn write_to(&self, sink: &mut dyn OutputSink) -> Result<(), BuildError> {
        if let Some(file) = self.files.iter().find(|f| !is_contained(&f.path)) {
            return Err(BuildError::UnsafePath {
                path: file.path.clone(),
            });
        }
        for file in &self.files {
            sink.write(&file.path, &file.contents)
                .map_err(|source| BuildError::Io {
                    path: file.path.clone(),
                    source,
                })?;
        }
        tracing::debug!(files = self.files.len(), "Wrote site");
        Ok(())
    }
}
