//! Page tree, navigation, feed and search index for taia.
//!
//! This crate provides:
//! - [`PageTree`]: parent/child hierarchy over tree entries, with cycle detection
//! - [`SiteUrls`]: the single source of page URLs, also an internal-link resolver
//! - [`NavigationPolicy`]: pluggable menu strategies rendered by [`render_nav`]
//! - [`paginate`]: fixed-size feed pages with pagination links
//! - [`TagIndex`]: entries grouped by tag
//! - [`build_index`]: `{title, url}` records for client-side search
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taia_site::{AncestorTrail, PageTree, SiteUrls, render_nav};
//! use taia_store::{Entry, RecordStore};
//!
//! let store = RecordStore::new(vec![
//!     Entry::new("Index"),
//!     Entry::new("B").with_parent("Index"),
//!     Entry::new("A").with_parent("Index"),
//! ])?;
//! let tree = PageTree::build(&store)?;
//! let urls = SiteUrls::new(&store);
//!
//! let nav = render_nav(&tree, &urls, &AncestorTrail, Some("Index"));
//! assert!(nav.find("a.html").unwrap() < nav.find("b.html").unwrap());
//! # Ok(())
//! # }
//! ```

mod feed;
mod navigation;
mod search;
mod slug;
mod tags;
mod tree;
mod urls;
mod warning;

pub use feed::{DEFAULT_PAGE_SIZE, FeedPage, feed_entry_html, page_of, paginate, pagination_html};
pub use navigation::{
    AncestorTrail, FullTree, MastersOnly, NavItem, Navigation, NavigationKind, NavigationPolicy,
    render_nav, render_nav_html,
};
pub use search::{SearchRecord, build_index, index_json};
pub use slug::{page_file, slugify};
pub use tags::{TagIndex, TaggedEntry};
pub use tree::{PageTree, TreeError};
pub use urls::{INDEX_PAGE, SEARCH_INDEX_FILE, SiteUrls};
pub use warning::Warning;
