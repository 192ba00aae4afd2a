//! Parsed record store.

use std::collections::HashMap;

use crate::entry::Entry;
use crate::error::ParseError;
use crate::notation::{Notation, NotationKind};

/// Ordered collection of parsed entries.
///
/// Entries keep their source order. Tree entries (non-feed) have unique
/// titles and can be looked up with [`RecordStore::get`]; feed entries may
/// repeat titles.
#[derive(Debug, Default)]
pub struct RecordStore {
    entries: Vec<Entry>,
    titles: HashMap<String, usize>,
}

impl RecordStore {
    /// Build a store from entries paired with their source lines,
    /// checking tree-title uniqueness.
    fn from_entries(entries: Vec<(usize, Entry)>) -> Result<Self, ParseError> {
        let mut titles: HashMap<String, usize> = HashMap::new();
        let mut first_lines: HashMap<&str, usize> = HashMap::new();

        for (idx, (line, entry)) in entries.iter().enumerate() {
            if entry.is_feed {
                continue;
            }
            if let Some(&first_line) = first_lines.get(entry.title.as_str()) {
                return Err(ParseError::DuplicateTitle {
                    title: entry.title.clone(),
                    first_line,
                    line: *line,
                });
            }
            first_lines.insert(&entry.title, *line);
            titles.insert(entry.title.clone(), idx);
        }

        Ok(Self {
            entries: entries.into_iter().map(|(_, entry)| entry).collect(),
            titles,
        })
    }

    /// Create a store directly from entries.
    ///
    /// Applies the same duplicate-title check as parsing.
    pub fn new(entries: Vec<Entry>) -> Result<Self, ParseError> {
        Self::from_entries(
            entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| (i + 1, e))
                .collect(),
        )
    }

    /// All entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Tree (non-feed) entries in source order.
    pub fn tree_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_feed)
    }

    /// Feed entries in source order.
    pub fn feed_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_feed)
    }

    /// Look up a tree entry by title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Entry> {
        self.titles.get(title).map(|&i| &self.entries[i])
    }

    /// Number of entries, tree and feed alike.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the store, returning entries in source order.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// Parse record text with the selected notation.
pub fn parse(text: &str, kind: NotationKind) -> Result<RecordStore, ParseError> {
    parse_with(text, kind.resolve(text))
}

/// Parse record text with a specific notation.
pub fn parse_with(text: &str, notation: &dyn Notation) -> Result<RecordStore, ParseError> {
    let entries = notation.entries(text)?;
    let store = RecordStore::from_entries(entries)?;
    tracing::debug!(
        notation = notation.name(),
        entries = store.len(),
        "Parsed record store"
    );
    Ok(store)
}
