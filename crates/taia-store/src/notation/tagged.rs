//! Tagged notation: `TITL:` / `UNDE:` / `DESC:` marker sequences.
//!
//! ```text
//! TITL: Harbor District
//! UNDE: City
//! TAGS: places, coast
//! DESC: The docks.
//!
//! Descriptions run until the next TITL: line, blank lines included.
//! TITL: City
//! DESC: ...
//! ```
//!
//! Header markers (`UNDE:`, `TAGS:`, `NUMB:`, `DATE:`, `FEED:`) appear
//! between `TITL:` and `DESC:`. Markers are only recognized at the start
//! of a line, so a description line must not itself start with `TITL:`.

use std::fmt::Write;

use super::Notation;
use crate::entry::Entry;
use crate::error::ParseError;
use crate::record::{Field, RawRecord};

pub(super) const TITLE_MARKER: &str = "TITL:";
const DESCRIPTION_MARKER: &str = "DESC:";

const HEADER_MARKERS: &[(&str, Field)] = &[
    ("UNDE:", Field::Parent),
    ("TAGS:", Field::Tags),
    ("NUMB:", Field::Sequence),
    ("DATE:", Field::Date),
    ("FEED:", Field::Feed),
];

/// `TITL:` / `UNDE:` / `DESC:` marker notation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaggedNotation;

struct Pending {
    record: RawRecord,
    description: Option<(usize, Vec<String>)>,
}

impl Pending {
    fn finish(self) -> Result<(usize, Entry), ParseError> {
        let mut record = self.record;
        if let Some((line, lines)) = self.description {
            record.set(Field::Description, &lines.join("\n"), line)?;
        }
        let line = record.line;
        Ok((line, record.into_entry()?))
    }
}

impl Notation for TaggedNotation {
    fn name(&self) -> &'static str {
        "tagged"
    }

    fn entries(&self, text: &str) -> Result<Vec<(usize, Entry)>, ParseError> {
        let mut records = Vec::new();
        let mut current: Option<Pending> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(title) = line.strip_prefix(TITLE_MARKER) {
                if let Some(pending) = current.take() {
                    records.push(pending.finish()?);
                }
                let mut record = RawRecord::new(line_no);
                record.set(Field::Title, title, line_no)?;
                current = Some(Pending {
                    record,
                    description: None,
                });
                continue;
            }

            let Some(pending) = current.as_mut() else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(ParseError::malformed(
                    line_no,
                    format!("text before the first {TITLE_MARKER} marker"),
                ));
            };

            if let Some((_, lines)) = pending.description.as_mut() {
                lines.push(line.to_owned());
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            if let Some(first) = line.strip_prefix(DESCRIPTION_MARKER) {
                pending.description = Some((line_no, vec![first.to_owned()]));
                continue;
            }

            let header = HEADER_MARKERS
                .iter()
                .find_map(|(marker, field)| line.strip_prefix(*marker).map(|value| (*field, value)));
            match header {
                Some((field, value)) => pending.record.set(field, value, line_no)?,
                None => {
                    return Err(ParseError::malformed(
                        line_no,
                        "unexpected line in record header",
                    ));
                }
            }
        }

        if let Some(pending) = current {
            records.push(pending.finish()?);
        }

        Ok(records)
    }

    fn render(&self, entries: &[Entry]) -> String {
        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{TITLE_MARKER} {}", entry.title);
            if let Some(parent) = &entry.parent {
                let _ = writeln!(out, "UNDE: {parent}");
            }
            if !entry.tags.is_empty() {
                let _ = writeln!(out, "TAGS: {}", entry.tags.join(", "));
            }
            if let Some(sequence) = entry.sequence {
                let _ = writeln!(out, "NUMB: {sequence}");
            }
            if let Some(date) = &entry.date {
                let _ = writeln!(out, "DATE: {date}");
            }
            if entry.is_feed {
                out.push_str("FEED: true\n");
            }
            let _ = writeln!(out, "{DESCRIPTION_MARKER} {}", entry.description);
        }
        out
    }
}
