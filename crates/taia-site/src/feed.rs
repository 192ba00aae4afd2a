//! Chronological feed pagination.

use std::fmt::Write as _;
use std::num::NonZeroUsize;

use taia_markup::escape_html;
use taia_store::Entry;

use crate::urls::SiteUrls;

/// Feed entries per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(16).expect("16 is non-zero");

/// One page of the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedPage<'a> {
    /// 1-based page number.
    pub number: usize,
    /// Total number of feed pages.
    pub total: usize,
    /// Entries on this page in authoring order.
    pub entries: Vec<&'a Entry>,
}

impl FeedPage<'_> {
    /// URL of this page.
    #[must_use]
    pub fn url(&self) -> String {
        SiteUrls::feed_page(self.number)
    }

    /// URL of the previous page, if any.
    #[must_use]
    pub fn prev(&self) -> Option<String> {
        (self.number > 1).then(|| SiteUrls::feed_page(self.number - 1))
    }

    /// URL of the next page, if any.
    #[must_use]
    pub fn next(&self) -> Option<String> {
        (self.number < self.total).then(|| SiteUrls::feed_page(self.number + 1))
    }

    /// Position of this page's first entry within the whole feed.
    ///
    /// Page `0` is treated as the first page.
    #[must_use]
    pub fn offset(&self, page_size: NonZeroUsize) -> usize {
        self.number.saturating_sub(1) * page_size.get()
    }
}

/// Split feed entries into pages of `page_size`, keeping their order.
///
/// The result has `ceil(entries.len() / page_size)` pages; an empty feed
/// has none.
#[must_use]
pub fn paginate<'a>(entries: &[&'a Entry], page_size: NonZeroUsize) -> Vec<FeedPage<'a>> {
    let total = entries.len().div_ceil(page_size.get());
    entries
        .chunks(page_size.get())
        .enumerate()
        .map(|(i, chunk)| FeedPage {
            number: i + 1,
            total,
            entries: chunk.to_vec(),
        })
        .collect()
}

/// 1-based page number holding the entry at 0-based `position`.
#[must_use]
pub fn page_of(position: usize, page_size: NonZeroUsize) -> usize {
    position / page_size.get() + 1
}

/// Previous/Next links and the page-number strip for `page`.
#[must_use]
pub fn pagination_html(page: &FeedPage<'_>) -> String {
    let mut html = String::from("<nav class=\"pagination\">");
    if let Some(prev) = page.prev() {
        let _ = write!(html, "<a class=\"prev\" href=\"{prev}\">Previous</a>");
    }
    for number in 1..=page.total {
        if number == page.number {
            let _ = write!(html, "<span class=\"current\">{number}</span>");
        } else {
            let _ = write!(
                html,
                "<a href=\"{}\">{number}</a>",
                SiteUrls::feed_page(number)
            );
        }
    }
    if let Some(next) = page.next() {
        let _ = write!(html, "<a class=\"next\" href=\"{next}\">Next</a>");
    }
    html.push_str("</nav>");
    html
}

/// Render one feed entry around its already compiled body.
#[must_use]
pub fn feed_entry_html(entry: &Entry, body_html: &str) -> String {
    let mut html = format!(
        "<article class=\"feed-entry\" id=\"{}\"><h2>{}</h2>",
        entry.anchor(),
        escape_html(&entry.title)
    );
    if let Some(date) = &entry.date {
        let _ = write!(html, "<p class=\"date\">{}</p>", escape_html(date));
    }
    let _ = write!(html, "<div class=\"entry-body\">{body_html}</div></article>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(count: usize) -> Vec<Entry> {
        (1..=count)
            .map(|i| Entry::new(format!("Day {i}")).as_feed(Some(i as u64)))
            .collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_paginate_33_by_16() {
        let entries = feed(33);
        let refs: Vec<&Entry> = entries.iter().collect();
        let pages = paginate(&refs, DEFAULT_PAGE_SIZE);

        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.total == 3));
        let sizes: Vec<usize> = pages.iter().map(|p| p.entries.len()).collect();
        assert_eq!(sizes, vec![16, 16, 1]);
        assert_eq!(pages[2].entries[0].title, "Day 33");
    }

    #[test]
    fn test_paginate_keeps_authoring_order() {
        let mut entries = feed(3);
        entries.reverse();
        let refs: Vec<&Entry> = entries.iter().collect();
        let pages = paginate(&refs, size(2));
        let titles: Vec<&str> = pages[0].entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Day 3", "Day 2"]);
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate(&[], DEFAULT_PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_prev_next() {
        let entries = feed(5);
        let refs: Vec<&Entry> = entries.iter().collect();
        let pages = paginate(&refs, size(2));

        assert_eq!(pages[0].prev(), None);
        assert_eq!(pages[0].next().as_deref(), Some("feed_2.html"));
        assert_eq!(pages[1].prev().as_deref(), Some("index.html"));
        assert_eq!(pages[2].next(), None);
        assert_eq!(pages[2].url(), "feed_3.html");
        assert_eq!(pages[2].offset(size(2)), 4);
    }

    #[test]
    fn test_offset_of_page_zero() {
        let page = FeedPage {
            number: 0,
            total: 1,
            entries: Vec::new(),
        };
        assert_eq!(page.offset(size(16)), 0);
        assert_eq!(page.prev(), None);
    }

    #[test]
    fn test_page_of() {
        assert_eq!(page_of(0, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(page_of(15, DEFAULT_PAGE_SIZE), 1);
        assert_eq!(page_of(16, DEFAULT_PAGE_SIZE), 2);
        assert_eq!(page_of(32, DEFAULT_PAGE_SIZE), 3);
    }

    #[test]
    fn test_pagination_html_middle_page() {
        let entries = feed(5);
        let refs: Vec<&Entry> = entries.iter().collect();
        let pages = paginate(&refs, size(2));

        assert_eq!(
            pagination_html(&pages[1]),
            "<nav class=\"pagination\">\
             <a class=\"prev\" href=\"index.html\">Previous</a>\
             <a href=\"index.html\">1</a>\
             <span class=\"current\">2</span>\
             <a href=\"feed_3.html\">3</a>\
             <a class=\"next\" href=\"feed_3.html\">Next</a>\
             </nav>"
        );
    }

    #[test]
    fn test_pagination_html_single_page() {
        let entries = feed(1);
        let refs: Vec<&Entry> = entries.iter().collect();
        let pages = paginate(&refs, DEFAULT_PAGE_SIZE);
        assert_eq!(
            pagination_html(&pages[0]),
            "<nav class=\"pagination\"><span class=\"current\">1</span></nav>"
        );
    }

    #[test]
    fn test_feed_entry_html() {
        let mut entry = Entry::new("Storm & Tide").as_feed(Some(12));
        entry.date = Some("Spring 1204".to_owned());
        assert_eq!(
            feed_entry_html(&entry, "<p>Body</p>"),
            "<article class=\"feed-entry\" id=\"12\"><h2>Storm &amp; Tide</h2>\
             <p class=\"date\">Spring 1204</p>\
             <div class=\"entry-body\"><p>Body</p></div></article>"
        );
    }

    #[test]
    fn test_feed_entry_anchor_fallback() {
        let entry = Entry::new("Undated").as_feed(None);
        assert!(feed_entry_html(&entry, "").contains("id=\"0\""));
    }
}
