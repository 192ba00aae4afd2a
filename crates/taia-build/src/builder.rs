//! Static site builder.
//!
//! Runs the whole pipeline for one record store: page tree, URL map,
//! markup, navigation, feed pages, tag pages and the search index. All
//! pages are rendered in memory first; see [`RenderedSite`].

use std::fmt::Write as _;
use std::num::NonZeroUsize;

use taia_markup::{MarkupCompiler, escape_html};
use taia_site::{
    DEFAULT_PAGE_SIZE, FeedPage, NavigationKind, NavigationPolicy, PageTree, SEARCH_INDEX_FILE,
    SiteUrls, TagIndex, Warning, build_index, feed_entry_html, index_json, paginate,
    pagination_html, render_nav,
};
use taia_store::{Entry, NotationKind, RecordStore};

use crate::error::BuildError;
use crate::report::{BuildReport, OutputFile, RenderedSite};
use crate::sink::OutputSink;
use crate::template::{FeedData, HtmlTemplate, PageData, Template};

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Feed entries per page.
    pub page_size: NonZeroUsize,
    /// Navigation menu policy.
    pub navigation: NavigationKind,
    /// Markup rewrite pass limit.
    pub max_passes: usize,
    /// Heading of feed pages.
    pub feed_title: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            navigation: NavigationKind::default(),
            max_passes: taia_markup::DEFAULT_MAX_PASSES,
            feed_title: "Chronicle".to_owned(),
        }
    }
}

/// Builds a static site from a record store.
pub struct StaticSiteBuilder {
    options: BuildOptions,
    compiler: MarkupCompiler,
    policy: Box<dyn NavigationPolicy>,
    template: Box<dyn Template>,
}

impl StaticSiteBuilder {
    /// Create a builder with the default template.
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self {
            compiler: MarkupCompiler::new().with_max_passes(options.max_passes),
            policy: options.navigation.policy(),
            template: Box::new(HtmlTemplate::default()),
            options,
        }
    }

    /// Use a custom page template.
    #[must_use]
    pub fn with_template(mut self, template: impl Template + 'static) -> Self {
        self.template = Box::new(template);
        self
    }

    /// Use a custom navigation policy instead of the configured one.
    #[must_use]
    pub fn with_policy(mut self, policy: impl NavigationPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Parse record text and render the site.
    pub fn render_text(&self, text: &str, notation: NotationKind) -> Result<RenderedSite, BuildError> {
        let store = taia_store::parse(text, notation)?;
        self.render(&store)
    }

    /// Render every file of the site in memory.
    ///
    /// # Errors
    ///
    /// Fails on a cyclic hierarchy or a description that does not settle.
    /// Nothing is produced in that case.
    pub fn render(&self, store: &RecordStore) -> Result<RenderedSite, BuildError> {
        let tree = PageTree::build(store)?;
        let urls = SiteUrls::with_page_size(store, self.options.page_size);
        let mut warnings: Vec<Warning> = tree
            .warnings()
            .iter()
            .chain(urls.warnings())
            .cloned()
            .collect();

        let bodies = self.compile_descriptions(store, &urls, &mut warnings)?;
        let tags = TagIndex::build(store.entries(), &urls);
        let mut files = Vec::with_capacity(store.len() + tags.len() + 2);

        let pages = self.render_tree_pages(store, &tree, &urls, &bodies, &mut files);
        let outside_nav = render_nav(&tree, &urls, self.policy.as_ref(), None);
        let feed_pages = self.render_feed_pages(store, &bodies, &tags, &outside_nav, &mut files);

        for tag in tags.tags() {
            let title = format!("Tag: {tag}");
            let html = self.template.page(&PageData {
                title: &title,
                body_html: &tags.body_html(tag),
                nav_html: &outside_nav,
            });
            files.push(OutputFile::new(SiteUrls::tag(tag), html));
        }

        let index = build_index(store.entries(), &urls);
        files.push(OutputFile::new(SEARCH_INDEX_FILE, index_json(&index)?));

        let report = BuildReport {
            entries: store.len(),
            pages,
            feed_pages,
            tag_pages: tags.len(),
            warnings,
        };
        tracing::info!(
            entries = report.entries,
            pages = report.pages,
            feed_pages = report.feed_pages,
            tag_pages = report.tag_pages,
            warnings = report.warnings.len(),
            policy = self.policy.name(),
            "Rendered site"
        );

        Ok(RenderedSite::new(files, report))
    }

    /// Render the site and write it to `sink`.
    pub fn build(&self, store: &RecordStore, sink: &mut dyn OutputSink) -> Result<BuildReport, BuildError> {
        let site = self.render(store)?;
        site.write_to(sink)?;
        Ok(site.into_report())
    }

    /// Compile every description, in store order.
    fn compile_descriptions(
        &self,
        store: &RecordStore,
        urls: &SiteUrls,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<String>, BuildError> {
        store
            .entries()
            .iter()
            .map(|entry| {
                let compiled = self
                    .compiler
                    .render(&entry.description, urls)
                    .map_err(|source| BuildError::Markup {
                        title: entry.title.clone(),
                        source,
                    })?;
                for target in compiled.broken_links {
                    tracing::warn!(source = %entry.title, target = %target, "Broken internal link");
                    warnings.push(Warning::BrokenInternalLink {
                        source: entry.title.clone(),
                        target,
                    });
                }
                Ok(compiled.html)
            })
            .collect()
    }

    fn render_tree_pages(
        &self,
        store: &RecordStore,
        tree: &PageTree,
        urls: &SiteUrls,
        bodies: &[String],
        files: &mut Vec<OutputFile>,
    ) -> usize {
        let mut pages = 0;
        for (entry, body) in store.entries().iter().zip(bodies) {
            if entry.is_feed {
                continue;
            }
            let Some(url) = urls.page(&entry.title) else {
                continue;
            };
            let nav_html = render_nav(tree, urls, self.policy.as_ref(), Some(entry.title.as_str()));
            let html = self.template.page(&PageData {
                title: &entry.title,
                body_html: &entry_body_html(entry, body),
                nav_html: &nav_html,
            });
            files.push(OutputFile::new(url, html));
            pages += 1;
        }
        pages
    }

    /// Render feed pages; the first one is the site entry point and is
    /// written even when the feed is empty.
    fn render_feed_pages(
        &self,
        store: &RecordStore,
        bodies: &[String],
        tags: &TagIndex<'_>,
        nav_html: &str,
        files: &mut Vec<OutputFile>,
    ) -> usize {
        let page_size = self.options.page_size;
        let feed_entries: Vec<&Entry> = store.feed_entries().collect();
        let feed_bodies: Vec<&str> = store
            .entries()
            .iter()
            .zip(bodies)
            .filter(|(entry, _)| entry.is_feed)
            .map(|(_, body)| body.as_str())
            .collect();

        let mut pages = paginate(&feed_entries, page_size);
        if pages.is_empty() {
            pages.push(FeedPage {
                number: 1,
                total: 1,
                entries: Vec::new(),
            });
        }

        for page in &pages {
            let mut body = String::new();
            if page.entries.is_empty() {
                body.push_str("<p class=\"empty-feed\">No entries yet.</p>\n");
            }
            let page_bodies = feed_bodies.iter().skip(page.offset(page_size));
            for (entry, entry_body) in page.entries.iter().zip(page_bodies) {
                body.push_str(&feed_entry_html(entry, entry_body));
                body.push('\n');
            }
            if page.number == 1 {
                body.push_str(&tags.index_html());
            }

            let pagination = pagination_html(page);
            let html = self.template.feed_page(
                &PageData {
                    title: &self.options.feed_title,
                    body_html: &body,
                    nav_html,
                },
                &FeedData {
                    page_number: page.number,
                    total_pages: page.total,
                    pagination_html: &pagination,
                },
            );
            files.push(OutputFile::new(page.url(), html));
        }
        pages.len()
    }
}

/// Body of a tree page: the compiled description and its tag links.
fn entry_body_html(entry: &Entry, body: &str) -> String {
    let mut html = format!("<div class=\"description\">\n{body}\n</div>");
    if !entry.tags.is_empty() {
        html.push_str("\n<p class=\"tags\">Tags: ");
        for (i, tag) in entry.tags.iter().enumerate() {
            if i > 0 {
                html.push_str(", ");
            }
            let _ = write!(
                html,
                "<a href=\"{}\">{}</a>",
                escape_html(&SiteUrls::tag(tag)),
                escape_html(tag)
            );
        }
        html.push_str("</p>");
    }
    html
}
