//! Output file writers.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Destination for generated files.
///
/// Paths are relative, `/`-separated and never leave the output root.
pub trait OutputSink {
    /// Write `contents` to `path`, replacing any previous file.
    fn write(&mut self, path: &str, contents: &[u8]) -> io::Result<()>;
}

/// Whether `path` is non-empty, relative and free of `.`/`..` components.
pub(crate) fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Writes files below a directory on disk.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Create a sink rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    fn write(&mut self, path: &str, contents: &[u8]) -> io::Result<()> {
        if !is_contained(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output path must be relative and stay below the output directory: {path}"),
            ));
        }

        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, contents)?;
        tracing::debug!(path = %target.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}

/// Collects files in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `path` as UTF-8, if written.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Written paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, path: &str, contents: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_owned(), contents.to_vec());
        Ok(())
    }
}
