//! Record store model and parsers for taia.
//!
//! A record store is a flat, hand-authored text file holding one content
//! entry per record. This crate turns that text into an ordered
//! [`RecordStore`] of [`Entry`] values and can render entries back into
//! either accepted notation.
//!
//! Two notations are supported, both implementing [`Notation`]:
//! - [`BlockNotation`]: blank-line separated blocks of `key: value` lines
//! - [`TaggedNotation`]: `TITL:` / `UNDE:` / `DESC:` marker sequences
//!
//! # Example
//!
//! ```
//! use taia_store::{NotationKind, parse};
//!
//! let text = "TITL: Home\nDESC: Welcome.\n\nTITL: About\nUNDE: Home\nDESC: Who we are.\n";
//! let store = parse(text, NotationKind::Auto)?;
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.get("About").unwrap().parent.as_deref(), Some("Home"));
//! # Ok::<(), taia_store::ParseError>(())
//! ```
//!
//! Parsing is a pure text-to-structure step: no HTML escaping and no
//! markup expansion happen here.

mod entry;
mod error;
mod notation;
mod record;
mod store;

pub use entry::Entry;
pub use error::ParseError;
pub use notation::{BlockNotation, Notation, NotationKind, TaggedNotation};
pub use store::{RecordStore, parse, parse_with};
