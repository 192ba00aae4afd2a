//! Notation-independent record accumulation.
//!
//! Notations recognize keys and split text into records; [`RawRecord`]
//! validates field values and turns a finished record into an [`Entry`].

use crate::entry::Entry;
use crate::error::ParseError;

/// Entry field addressed by a notation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    Title,
    Parent,
    Description,
    Tags,
    Sequence,
    Date,
    Feed,
}

impl Field {
    /// Whether the field accepts multi-line values.
    fn is_multiline(self) -> bool {
        matches!(self, Self::Description)
    }
}

/// A record under construction.
#[derive(Debug)]
pub(crate) struct RawRecord {
    /// Line the record starts on (1-based).
    pub(crate) line: usize,
    title: Option<String>,
    parent: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
    sequence: Option<u64>,
    date: Option<String>,
    feed: Option<bool>,
}

impl RawRecord {
    pub(crate) fn new(line: usize) -> Self {
        Self {
            line,
            title: None,
            parent: None,
            description: None,
            tags: Vec::new(),
            sequence: None,
            date: None,
            feed: None,
        }
    }

    /// Set a field from its first value line.
    ///
    /// Setting a single-valued field twice is an error. Tags accumulate.
    pub(crate) fn set(&mut self, field: Field, value: &str, line: usize) -> Result<(), ParseError> {
        let value = value.trim();
        match field {
            Field::Title => set_once(&mut self.title, value, "title", line),
            Field::Parent => set_once(&mut self.parent, value, "parent", line),
            Field::Description => set_once(&mut self.description, value, "description", line),
            Field::Date => set_once(&mut self.date, value, "date", line),
            Field::Tags => {
                push_tags(&mut self.tags, value);
                Ok(())
            }
            Field::Sequence => {
                if self.sequence.is_some() {
                    return Err(repeated("sequence", line));
                }
                let number = value.parse::<u64>().map_err(|_| {
                    ParseError::malformed(line, format!("invalid sequence number \"{value}\""))
                })?;
                self.sequence = Some(number);
                Ok(())
            }
            Field::Feed => {
                if self.feed.is_some() {
                    return Err(repeated("feed", line));
                }
                self.feed = Some(parse_flag(value, line)?);
                Ok(())
            }
        }
    }

    /// Append a continuation line to a previously set field.
    pub(crate) fn append(&mut self, field: Field, text: &str, line: usize) -> Result<(), ParseError> {
        if field == Field::Tags {
            push_tags(&mut self.tags, text);
            return Ok(());
        }
        if !field.is_multiline() {
            return Err(ParseError::malformed(
                line,
                format!("{field:?} does not accept continuation lines").to_lowercase(),
            ));
        }
        let value = self.description.get_or_insert_with(String::new);
        value.push('\n');
        value.push_str(text);
        Ok(())
    }

    /// Finish the record, checking required fields.
    pub(crate) fn into_entry(self) -> Result<Entry, ParseError> {
        let title = self
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ParseError::malformed(self.line, "record has no title"))?;

        let parent = self
            .parent
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        Ok(Entry {
            title,
            parent,
            description: self
                .description
                .map(|d| d.trim().to_owned())
                .unwrap_or_default(),
            tags: self.tags,
            sequence: self.sequence,
            date: self.date.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty()),
            is_feed: self.feed.unwrap_or(false),
        })
    }
}

fn set_once(
    slot: &mut Option<String>,
    value: &str,
    name: &str,
    line: usize,
) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(repeated(name, line));
    }
    *slot = Some(value.to_owned());
    Ok(())
}

fn repeated(name: &str, line: usize) -> ParseError {
    ParseError::malformed(line, format!("{name} given more than once"))
}

fn push_tags(tags: &mut Vec<String>, value: &str) {
    tags.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned),
    );
}

fn parse_flag(value: &str, line: usize) -> Result<bool, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::malformed(
            line,
            format!("invalid feed flag \"{value}\""),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_entry_requires_title() {
        let record = RawRecord::new(7);
        let err = record.into_entry().unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedRecord {
                line: 7,
                reason: "record has no title".to_owned()
            }
        );
    }

    #[test]
    fn test_blank_title_is_missing() {
        let mut record = RawRecord::new(1);
        record.set(Field::Title, "   ", 1).unwrap();
        assert!(record.into_entry().is_err());
    }

    #[test]
    fn test_set_twice_fails() {
        let mut record = RawRecord::new(1);
        record.set(Field::Parent, "A", 1).unwrap();
        let err = record.set(Field::Parent, "B", 2).unwrap_err();
        assert!(err.to_string().contains("parent given more than once"));
    }

    #[test]
    fn test_tags_accumulate() {
        let mut record = RawRecord::new(1);
        record.set(Field::Title, "T", 1).unwrap();
        record.set(Field::Tags, "a, b", 2).unwrap();
        record.append(Field::Tags, "c,,", 3).unwrap();
        let entry = record.into_entry().unwrap();
        assert_eq!(entry.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_sequence() {
        let mut record = RawRecord::new(1);
        let err = record.set(Field::Sequence, "twelve", 4).unwrap_err();
        assert!(matches!(err, ParseError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn test_feed_flag_values() {
        for (value, expected) in [("yes", true), ("TRUE", true), ("1", true), ("no", false)] {
            let mut record = RawRecord::new(1);
            record.set(Field::Title, "T", 1).unwrap();
            record.set(Field::Feed, value, 1).unwrap();
            assert_eq!(record.into_entry().unwrap().is_feed, expected, "{value}");
        }
    }

    #[test]
    fn test_sequence_rejects_continuation() {
        let mut record = RawRecord::new(1);
        record.set(Field::Sequence, "1", 1).unwrap();
        assert!(record.append(Field::Sequence, "2", 2).is_err());
    }

    #[test]
    fn test_single_line_fields_reject_continuation() {
        for field in [Field::Title, Field::Parent, Field::Date] {
            let mut record = RawRecord::new(1);
            record.set(field, "Harbor", 1).unwrap();
            let err = record.append(field, "District", 2).unwrap_err();
            assert!(
                matches!(err, ParseError::MalformedRecord { line: 2, .. }),
                "{field:?}"
            );
        }
    }

    #[test]
    fn test_description_continuation_joins_lines() {
        let mut record = RawRecord::new(1);
        record.set(Field::Title, "T", 1).unwrap();
        record.set(Field::Description, "first", 2).unwrap();
        record.append(Field::Description, "", 3).unwrap();
        record.append(Field::Description, "third", 4).unwrap();
        let entry = record.into_entry().unwrap();
        assert_eq!(entry.description, "first\n\nthird");
    }
}
