//! HTML page template for static site generation.
//!
//! The builder hands every page to a [`Template`] as already rendered
//! fragments. [`HtmlTemplate`] lays them out with a navigation sidebar and
//! the search box driven by the site script, which loads
//! `search_index.json` and fills `#searchResults`.

use std::fmt::Write;

use taia_markup::escape_html;

/// Fragments of one page.
#[derive(Clone, Copy, Debug)]
pub struct PageData<'a> {
    /// Page heading and document title.
    pub title: &'a str,
    /// Compiled page body.
    pub body_html: &'a str,
    /// Rendered navigation menu.
    pub nav_html: &'a str,
}

/// Feed pagination details.
#[derive(Clone, Copy, Debug)]
pub struct FeedData<'a> {
    /// 1-based page number.
    pub page_number: usize,
    /// Total number of feed pages.
    pub total_pages: usize,
    /// Previous/Next links and page-number strip.
    pub pagination_html: &'a str,
}

/// Turns page fragments into complete documents.
pub trait Template: Send + Sync {
    /// Render a content, tag or index page.
    fn page(&self, page: &PageData<'_>) -> String;

    /// Render a feed page.
    fn feed_page(&self, page: &PageData<'_>, feed: &FeedData<'_>) -> String;
}

/// Default sidebar layout.
#[derive(Clone, Debug)]
pub struct HtmlTemplate {
    site_title: String,
    stylesheet: String,
    script: String,
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self::new("Chronicle", "styles.css", "script.js")
    }
}

impl HtmlTemplate {
    /// Create a template with the site name and asset URLs.
    pub fn new(
        site_title: impl Into<String>,
        stylesheet: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            site_title: site_title.into(),
            stylesheet: stylesheet.into(),
            script: script.into(),
        }
    }

    fn render(&self, page: &PageData<'_>, document_title: &str, footer: &str) -> String {
        let mut html = String::with_capacity(4096 + page.body_html.len() + page.nav_html.len());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(document_title));
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(&self.stylesheet)
        );
        html.push_str("</head>\n<body>\n");

        html.push_str("<button class=\"toggle-btn\" type=\"button\">Menu</button>\n");
        self.render_sidebar(&mut html, page.nav_html);

        html.push_str("<main>\n");
        let _ = writeln!(html, "<h1>{}</h1>", escape_html(page.title));
        html.push_str(page.body_html);
        html.push('\n');
        html.push_str(footer);
        html.push_str("</main>\n");

        let _ = writeln!(
            html,
            "<script src=\"{}\"></script>",
            escape_html(&self.script)
        );
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_sidebar(&self, html: &mut String, nav_html: &str) {
        html.push_str("<aside class=\"sidebar\">\n");
        let _ = writeln!(
            html,
            "<a class=\"site-title\" href=\"index.html\">{}</a>",
            escape_html(&self.site_title)
        );
        html.push_str("<div class=\"search\">\n");
        html.push_str(
            "<input type=\"search\" id=\"searchInput\" placeholder=\"Search\" \
             autocomplete=\"off\">\n",
        );
        html.push_str("<div id=\"searchResults\"></div>\n</div>\n");
        html.push_str("<nav>\n<h2>Navigation</h2>\n");
        html.push_str(nav_html);
        html.push_str("\n</nav>\n</aside>\n");
    }
}

impl Template for HtmlTemplate {
    fn page(&self, page: &PageData<'_>) -> String {
        let document_title = if page.title == self.site_title {
            page.title.to_owned()
        } else {
            format!("{} | {}", page.title, self.site_title)
        };
        self.render(page, &document_title, "")
    }

    fn feed_page(&self, page: &PageData<'_>, feed: &FeedData<'_>) -> String {
        let document_title = if feed.total_pages > 1 {
            format!(
                "{} (page {} of {})",
                page.title, feed.page_number, feed.total_pages
            )
        } else {
            page.title.to_owned()
        };
        let footer = if feed.total_pages > 1 {
            format!("{}\n", feed.pagination_html)
        } else {
            String::new()
        };
        self.render(page, &document_title, &footer)
    }
}
