//! Entry data model.

/// One content unit parsed from the record store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Unique identifier among tree entries and slug source.
    pub title: String,
    /// Title of the entry this one is nested under (`None` for master pages).
    pub parent: Option<String>,
    /// Raw body text. May contain inline markup and literal HTML.
    pub description: String,
    /// Classification labels in authoring order.
    pub tags: Vec<String>,
    /// Position in the chronological feed.
    pub sequence: Option<u64>,
    /// Free-form date label for feed entries.
    pub date: Option<String>,
    /// True if the entry belongs to the chronological feed instead of the page tree.
    pub is_feed: bool,
}

impl Entry {
    /// Create a top-level entry with an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the parent title.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Mark as a feed entry with the given sequence number.
    #[must_use]
    pub fn as_feed(mut self, sequence: Option<u64>) -> Self {
        self.is_feed = true;
        self.sequence = sequence;
        self
    }

    /// Stable anchor for feed rendering, `"0"` when no sequence number is set.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.sequence.unwrap_or(0).to_string()
    }
}
