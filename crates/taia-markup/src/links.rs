//! Internal link resolution for `(intl "Title")`.

/// Maps a page title to its URL.
pub trait LinkResolver {
    /// URL for `title`, or `None` if no such page exists.
    fn resolve(&self, title: &str) -> Option<String>;
}

impl<F> LinkResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, title: &str) -> Option<String> {
        self(title)
    }
}

/// Resolver that knows no pages.
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _title: &str) -> Option<String> {
        None
    }
}
