//! Static site generation for taia record stores.
//!
//! [`StaticSiteBuilder`] turns a parsed [`RecordStore`](taia_store::RecordStore)
//! into HTML pages, feed pages, tag pages and a search index. Pages are
//! laid out by a [`Template`] and written through an [`OutputSink`].
//!
//! ```
//! use taia_build::{BuildOptions, MemorySink, StaticSiteBuilder};
//! use taia_store::{NotationKind, parse};
//!
//! let store = parse("TITL: Home\nDESC: (bold \"Hello\")\n", NotationKind::Auto)?;
//! let mut sink = MemorySink::new();
//! let report = StaticSiteBuilder::new(BuildOptions::default()).build(&store, &mut sink)?;
//!
//! assert_eq!(report.pages, 1);
//! assert!(sink.get("home.html").unwrap().contains("<strong>Hello</strong>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;
mod report;
mod sink;
mod template;

pub use builder::{BuildOptions, StaticSiteBuilder};
pub use error::BuildError;
pub use report::{BuildReport, OutputFile, RenderedSite};
pub use sink::{FsSink, MemorySink, OutputSink};
pub use template::{FeedData, HtmlTemplate, PageData, Template};
