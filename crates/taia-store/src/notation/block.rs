//! Block notation: blank-line separated `key: value` lines.
//!
//! ```text
//! title: Harbor District
//! parent: City
//! tags: places, coast
//! description: The docks.
//!  Continuation lines start with one space.
//!  .
//!  A lone "." stands for an empty line.
//! ```
//!
//! Keys are case-insensitive. Unknown keys and their continuation lines
//! are ignored. Only `description` spans several lines.

use std::fmt::Write;

use super::Notation;
use crate::entry::Entry;
use crate::error::ParseError;
use crate::record::{Field, RawRecord};

/// Blank-line separated `key: value` notation.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockNotation;

/// Field receiving continuation lines.
enum Continuation {
    None,
    Field(Field),
    Ignored,
}

fn field_for_key(key: &str) -> Option<Field> {
    match key.to_ascii_lowercase().as_str() {
        "title" => Some(Field::Title),
        "parent" => Some(Field::Parent),
        "description" | "desc" => Some(Field::Description),
        "tags" => Some(Field::Tags),
        "sequence" | "seq" => Some(Field::Sequence),
        "date" => Some(Field::Date),
        "feed" => Some(Field::Feed),
        _ => None,
    }
}

fn finish(record: RawRecord) -> Result<(usize, Entry), ParseError> {
    let line = record.line;
    Ok((line, record.into_entry()?))
}

impl Notation for BlockNotation {
    fn name(&self) -> &'static str {
        "block"
    }

    fn entries(&self, text: &str) -> Result<Vec<(usize, Entry)>, ParseError> {
        let mut records = Vec::new();
        let mut current: Option<RawRecord> = None;
        let mut continuation = Continuation::None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if line.trim().is_empty() {
                if let Some(record) = current.take() {
                    records.push(finish(record)?);
                }
                continuation = Continuation::None;
                continue;
            }

            if line.starts_with([' ', '\t']) {
                let content = &line[1..];
                let content = if content.trim() == "." {
                    ""
                } else {
                    content.trim_end()
                };
                match (&mut current, &continuation) {
                    (Some(record), Continuation::Field(field)) => {
                        record.append(*field, content, line_no)?;
                    }
                    (Some(_), Continuation::Ignored) => {}
                    _ => {
                        return Err(ParseError::malformed(
                            line_no,
                            "continuation line without a preceding field",
                        ));
                    }
                }
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                return Err(ParseError::malformed(line_no, "expected `key: value`"));
            };
            let record = current.get_or_insert_with(|| RawRecord::new(line_no));
            let key = key.trim();

            continuation = if let Some(field) = field_for_key(key) {
                record.set(field, value, line_no)?;
                Continuation::Field(field)
            } else {
                tracing::debug!(key, line = line_no, "Ignoring unknown key");
                Continuation::Ignored
            };
        }
        if let Some(record) = current {
            records.push(finish(record)?);
        }

        Ok(records)
    }

    fn render(&self, entries: &[Entry]) -> String {
        let mut out = String::new();
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "title: {}", entry.title);
            if let Some(parent) = &entry.parent {
                let _ = writeln!(out, "parent: {parent}");
            }
            if !entry.tags.is_empty() {
                let _ = writeln!(out, "tags: {}", entry.tags.join(", "));
            }
            if let Some(sequence) = entry.sequence {
                let _ = writeln!(out, "sequence: {sequence}");
            }
            if let Some(date) = &entry.date {
                let _ = writeln!(out, "date: {date}");
            }
            if entry.is_feed {
                out.push_str("feed: true\n");
            }
            out.push_str("description:");
            let mut lines = entry.description.lines();
            if let Some(first) = lines.next() {
                let _ = write!(out, " {first}");
            }
            out.push('\n');
            for line in lines {
                if line.trim().is_empty() {
                    out.push_str(" .\n");
                } else {
                    let _ = writeln!(out, " {line}");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Vec<Entry>, ParseError> {
        Ok(BlockNotation
            .entries(text)?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    #[test]
    fn test_parse_single_record() {
        let entries = parse("title: Home\ndescription: Welcome.\n").unwrap();
        assert_eq!(
            entries,
            vec![Entry::new("Home").with_description("Welcome.")]
        );
    }

    #[test]
    fn test_parse_all_fields() {
        let text = "Title: Day 3\nParent: Log\nTags: travel, sea\nSeq: 3\nDate: 1201-04-09\nFeed: yes\nDesc: Rain.\n";
        let entries = parse(text).unwrap();
        let entry = &entries[0];

        assert_eq!(entry.title, "Day 3");
        assert_eq!(entry.parent.as_deref(), Some("Log"));
        assert_eq!(entry.tags, vec!["travel", "sea"]);
        assert_eq!(entry.sequence, Some(3));
        assert_eq!(entry.date.as_deref(), Some("1201-04-09"));
        assert!(entry.is_feed);
        assert_eq!(entry.description, "Rain.");
    }

    #[test]
    fn test_blank_lines_separate_records() {
        let text = "title: A\n\n\ntitle: B\nparent: A\n";
        let entries = parse(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].parent.as_deref(), Some("A"));
    }

    #[test]
    fn test_multiline_description() {
        let text = "title: A\ndescription: one\n two\n .\n   indented\n";
        let entries = parse(text).unwrap();
        assert_eq!(entries[0].description, "one\ntwo\n\n  indented");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let text = "title: A\nmood: sunny\n and warm\ndescription: x\n";
        let entries = parse(text).unwrap();
        assert_eq!(entries[0].description, "x");
    }

    #[test]
    fn test_description_value_keeps_colons() {
        let entries = parse("title: A\ndescription: time: 10:30\n").unwrap();
        assert_eq!(entries[0].description, "time: 10:30");
    }

    #[test]
    fn test_line_without_colon_is_malformed() {
        let err = parse("title: A\njust words\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedRecord {
                line: 2,
                reason: "expected `key: value`".to_owned()
            }
        );
    }

    #[test]
    fn test_leading_continuation_is_malformed() {
        let err = parse(" orphan\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_record_without_title_is_malformed() {
        let err = parse("title: A\n\nparent: A\ndescription: x\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_continued_title_is_malformed() {
        let err = parse("title: Harbor\n District\ndescription: x\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedRecord {
                line: 2,
                reason: "title does not accept continuation lines".to_owned()
            }
        );
    }

    #[test]
    fn test_render_round_trip_multiline_description() {
        let text = "title: Harbor\nparent: City\ndate: Spring\ndescription: Docks\n and piers\n .\n  quay\n";
        let entries = parse(text).unwrap();
        assert_eq!(entries[0].description, "Docks\nand piers\n\n quay");

        let rendered = BlockNotation.render(&entries);
        assert_eq!(parse(&rendered).unwrap(), entries);
    }

    #[test]
    fn test_render_round_trip() {
        let entries = vec![
            Entry::new("Home").with_description("Line one\n\nLine three\n  indented"),
            Entry::new("Child")
                .with_parent("Home")
                .with_tag("a")
                .with_tag("b")
                .with_description("Short"),
            Entry {
                date: Some("Spring".to_owned()),
                ..Entry::new("Day 1").as_feed(Some(1))
            },
        ];

        let text = BlockNotation.render(&entries);
        assert_eq!(parse(&text).unwrap(), entries);
    }
}
