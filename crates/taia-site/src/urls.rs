//! URL map for every generated file.
//!
//! All page URLs are computed once from the record store so that
//! navigation, tag pages, internal links and the search index agree.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use taia_markup::LinkResolver;
use taia_store::{Entry, RecordStore};

use crate::feed::{DEFAULT_PAGE_SIZE, page_of};
use crate::slug::slugify;
use crate::warning::Warning;

/// First feed page and site entry point.
pub const INDEX_PAGE: &str = "index.html";

/// Search index consumed by the client-side search script.
pub const SEARCH_INDEX_FILE: &str = "search_index.json";

/// Canonical URLs for pages, feed pages and tag pages.
#[derive(Debug)]
pub struct SiteUrls {
    pages: HashMap<String, String>,
    page_size: NonZeroUsize,
    warnings: Vec<Warning>,
}

impl SiteUrls {
    /// Assign URLs using the default feed page size.
    #[must_use]
    pub fn new(store: &RecordStore) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Assign URLs for a feed paginated with `page_size` entries per page.
    ///
    /// Tree pages are assigned in source order. A page whose file name is
    /// reserved is moved to `page_<slug>.html`; a page whose file name is
    /// already taken gets a numeric suffix.
    #[must_use]
    pub fn with_page_size(store: &RecordStore, page_size: NonZeroUsize) -> Self {
        let mut pages = HashMap::new();
        let mut taken: HashSet<String> = HashSet::new();
        let mut warnings = Vec::new();

        for entry in store.tree_entries() {
            let slug = slugify(&entry.title);
            let mut stem = slug.clone();
            let reserved = is_reserved(&slug);
            if reserved {
                stem = format!("page_{slug}");
            }

            let mut url = format!("{stem}.html");
            let mut suffix = 2;
            while taken.contains(&url) {
                url = format!("{stem}_{suffix}.html");
                suffix += 1;
            }

            let warning = if reserved {
                Some(Warning::ReservedPath {
                    title: entry.title.clone(),
                    url: url.clone(),
                })
            } else if suffix > 2 {
                Some(Warning::SlugCollision {
                    title: entry.title.clone(),
                    url: url.clone(),
                })
            } else {
                None
            };
            if let Some(warning) = warning {
                tracing::warn!(%warning, "Renamed page");
                warnings.push(warning);
            }

            taken.insert(url.clone());
            pages.insert(entry.title.clone(), url);
        }

        Self {
            pages,
            page_size,
            warnings,
        }
    }

    /// URL of a tree page.
    #[must_use]
    pub fn page(&self, title: &str) -> Option<&str> {
        self.pages.get(title).map(String::as_str)
    }

    /// Canonical URL of an entry: its page, or the first feed page for feed entries.
    #[must_use]
    pub fn entry(&self, entry: &Entry) -> &str {
        if entry.is_feed {
            return INDEX_PAGE;
        }
        self.page(&entry.title).unwrap_or(INDEX_PAGE)
    }

    /// URL of feed page `number` (1-based).
    #[must_use]
    pub fn feed_page(number: usize) -> String {
        if number <= 1 {
            INDEX_PAGE.to_owned()
        } else {
            format!("feed_{number}.html")
        }
    }

    /// URL pointing at a feed entry's anchor on the page holding it.
    ///
    /// `position` is the 0-based index of the entry in the feed.
    #[must_use]
    pub fn feed_entry(&self, position: usize, entry: &Entry) -> String {
        let page = Self::feed_page(page_of(position, self.page_size));
        format!("{page}#{}", entry.anchor())
    }

    /// URL of the listing page for `tag`.
    #[must_use]
    pub fn tag(tag: &str) -> String {
        format!("tag_{}.html", slugify(tag))
    }

    /// Feed page size the URLs were computed for.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Pages that were renamed.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

impl LinkResolver for SiteUrls {
    fn resolve(&self, title: &str) -> Option<String> {
        self.page(title).map(str::to_owned)
    }
}

fn is_reserved(slug: &str) -> bool {
    slug == "index"
        || slug == "search_index"
        || slug.starts_with("tag_")
        || slug.starts_with("feed_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn urls(entries: Vec<Entry>) -> SiteUrls {
        SiteUrls::new(&RecordStore::new(entries).unwrap())
    }

    #[test]
    fn test_page_url_from_slug() {
        let urls = urls(vec![Entry::new("Harbor District")]);
        assert_eq!(urls.page("Harbor District"), Some("harbor_district.html"));
        assert!(urls.warnings().is_empty());
    }

    #[test]
    fn test_unknown_page() {
        let urls = urls(vec![Entry::new("A")]);
        assert_eq!(urls.page("B"), None);
        assert_eq!(urls.resolve("B"), None);
        assert_eq!(urls.resolve("A"), Some("a.html".to_owned()));
    }

    #[test]
    fn test_feed_entry_uses_index() {
        let urls = urls(vec![Entry::new("Day one").as_feed(Some(1))]);
        assert_eq!(urls.entry(&Entry::new("Day one").as_feed(Some(1))), INDEX_PAGE);
    }

    #[test]
    fn test_reserved_index_renamed() {
        let urls = urls(vec![Entry::new("Index")]);
        assert_eq!(urls.page("Index"), Some("page_index.html"));
        assert_eq!(
            urls.warnings(),
            &[Warning::ReservedPath {
                title: "Index".to_owned(),
                url: "page_index.html".to_owned(),
            }]
        );
    }

    #[test]
    fn test_reserved_prefixes() {
        let urls = urls(vec![
            Entry::new("Tag list"),
            Entry::new("feed_2"),
            Entry::new("Search Index"),
        ]);
        assert_eq!(urls.page("Tag list"), Some("page_tag_list.html"));
        assert_eq!(urls.page("feed_2"), Some("page_feed_2.html"));
        assert_eq!(urls.page("Search Index"), Some("page_search_index.html"));
    }

    #[test]
    fn test_slug_collision_suffix() {
        let urls = urls(vec![
            Entry::new("Old Mill"),
            Entry::new("old mill"),
            Entry::new("OLD MILL"),
        ]);
        assert_eq!(urls.page("Old Mill"), Some("old_mill.html"));
        assert_eq!(urls.page("old mill"), Some("old_mill_2.html"));
        assert_eq!(urls.page("OLD MILL"), Some("old_mill_3.html"));
        assert_eq!(urls.warnings().len(), 2);
    }

    #[test]
    fn test_renamed_page_does_not_collide() {
        let urls = urls(vec![Entry::new("Index"), Entry::new("Page Index")]);
        assert_eq!(urls.page("Index"), Some("page_index.html"));
        assert_eq!(urls.page("Page Index"), Some("page_index_2.html"));
    }

    #[test]
    fn test_feed_page_urls() {
        assert_eq!(SiteUrls::feed_page(1), "index.html");
        assert_eq!(SiteUrls::feed_page(3), "feed_3.html");
    }

    #[test]
    fn test_feed_entry_anchor() {
        let store = RecordStore::new(Vec::new()).unwrap();
        let urls = SiteUrls::with_page_size(&store, NonZeroUsize::new(2).unwrap());
        let entry = Entry::new("Third").as_feed(Some(7));
        assert_eq!(urls.feed_entry(0, &entry), "index.html#7");
        assert_eq!(urls.feed_entry(2, &entry), "feed_2.html#7");
    }

    #[test]
    fn test_tag_url() {
        assert_eq!(SiteUrls::tag("Sea Lore"), "tag_sea_lore.html");
    }
}
