//! Title to URL slug conversion.

/// Slug for a title: lowercase, spaces replaced by underscores.
///
/// Path separators also become underscores so every slug names a single
/// file inside the output directory.
#[must_use]
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace([' ', '/', '\\'], "_")
}

/// Output file name for a title (`slug.html`).
#[must_use]
pub fn page_file(title: &str) -> String {
    format!("{}.html", slugify(title))
}
