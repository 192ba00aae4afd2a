//! Search index for the client-side search script.

use serde::{Deserialize, Serialize};
use taia_store::Entry;

use crate::urls::SiteUrls;

/// One searchable entry. Key names are read by the front-end script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Entry title.
    pub title: String,
    /// Canonical URL; the first feed page for feed entries.
    pub url: String,
}

/// One record per entry, tree and feed alike, in source order.
#[must_use]
pub fn build_index(entries: &[Entry], urls: &SiteUrls) -> Vec<SearchRecord> {
    entries
        .iter()
        .map(|entry| SearchRecord {
            title: entry.title.clone(),
            url: urls.entry(entry).to_owned(),
        })
        .collect()
}

/// Serialize records as a JSON array.
pub fn index_json(records: &[SearchRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
