//! Entries grouped by tag.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use taia_markup::escape_html;
use taia_store::Entry;

use crate::slug::slugify;
use crate::urls::SiteUrls;

/// A tagged entry and the URL its listing links to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedEntry<'a> {
    /// The entry.
    pub entry: &'a Entry,
    /// Page URL for tree entries, feed page plus anchor for feed entries.
    pub url: String,
}

/// Tag listing for every distinct tag, ordered by tag name.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    tags: BTreeMap<&'a str, Vec<TaggedEntry<'a>>>,
}

impl<'a> TagIndex<'a> {
    /// Group `entries` (tree and feed, in source order) by tag.
    ///
    /// Tags that share a slug share a page, named by the first spelling
    /// seen. An entry listing the same tag twice appears once on that page.
    #[must_use]
    pub fn build(entries: &'a [Entry], urls: &SiteUrls) -> Self {
        let mut tags: BTreeMap<&'a str, Vec<TaggedEntry<'a>>> = BTreeMap::new();
        let mut spellings: HashMap<String, &'a str> = HashMap::new();
        let mut feed_position = 0;

        for entry in entries {
            let url = if entry.is_feed {
                let url = urls.feed_entry(feed_position, entry);
                feed_position += 1;
                url
            } else {
                urls.entry(entry).to_owned()
            };

            for tag in &entry.tags {
                let name = *spellings.entry(slugify(tag)).or_insert(tag.as_str());
                let listed = tags.entry(name).or_default();
                if listed.last().is_some_and(|t| std::ptr::eq(t.entry, entry)) {
                    continue;
                }
                listed.push(TaggedEntry {
                    entry,
                    url: url.clone(),
                });
            }
        }

        Self { tags }
    }

    /// Distinct tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tags.keys().copied()
    }

    /// Entries carrying `tag`, in source order.
    #[must_use]
    pub fn entries(&self, tag: &str) -> &[TaggedEntry<'a>] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True if no entry carries a tag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Body of the listing page for `tag`.
    #[must_use]
    pub fn body_html(&self, tag: &str) -> String {
        let mut html = String::from("<ul class=\"tag-entries\">");
        for tagged in self.entries(tag) {
            let _ = write!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&tagged.url),
                escape_html(&tagged.entry.title)
            );
        }
        html.push_str("</ul>");
        html
    }

    /// Links to every tag page, for the site entry point.
    #[must_use]
    pub fn index_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut html = String::from("<section class=\"tags\"><h2>Tags</h2><ul>");
        for (tag, entries) in &self.tags {
            let _ = write!(
                html,
                "<li><a href=\"{}\">{}</a> ({})</li>",
                escape_html(&SiteUrls::tag(tag)),
                escape_html(tag),
                entries.len()
            );
        }
        html.push_str("</ul></section>");
        html
    }
}
