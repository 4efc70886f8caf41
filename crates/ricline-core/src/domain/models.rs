use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{FieldId, FieldValue, HistoryInterval, Ric, UtcDateTime, ValidationError};

const MAX_STORY_ID_LEN: usize = 128;

/// One requested field paired with its returned value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub id: FieldId,
    pub value: FieldValue,
}

impl FieldEntry {
    pub fn new(id: FieldId, value: FieldValue) -> Self {
        Self { id, value }
    }
}

/// Snapshot pricing row: one instrument, requested fields in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub ric: Ric,
    pub fields: Vec<FieldEntry>,
}

impl SnapshotRow {
    pub fn new(ric: Ric, fields: Vec<FieldEntry>) -> Self {
        Self { ric, fields }
    }

    /// Value for a field, if the row carries it.
    pub fn value(&self, id: &FieldId) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| &entry.value)
    }
}

/// One dated row of an interday series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: Date,
    pub fields: Vec<FieldEntry>,
}

impl HistoryRow {
    pub fn new(date: Date, fields: Vec<FieldEntry>) -> Self {
        Self { date, fields }
    }
}

/// Interday series for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub ric: Ric,
    pub interval: HistoryInterval,
    pub rows: Vec<HistoryRow>,
}

impl HistorySeries {
    pub fn new(ric: Ric, interval: HistoryInterval, rows: Vec<HistoryRow>) -> Self {
        Self {
            ric,
            interval,
            rows,
        }
    }
}

/// News story identifier ("urn:newsml:..." on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoryId(String);

impl StoryId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyStoryId);
        }

        let len = trimmed.chars().count();
        if len > MAX_STORY_ID_LEN {
            return Err(ValidationError::StoryIdTooLong {
                len,
                max: MAX_STORY_ID_LEN,
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::StoryIdWhitespace);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for StoryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StoryId> for String {
    fn from(value: StoryId) -> Self {
        value.0
    }
}

/// Single news headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub story_id: StoryId,
    pub title: String,
    pub created: Option<UtcDateTime>,
}

impl Headline {
    pub fn new(story_id: StoryId, title: impl Into<String>, created: Option<UtcDateTime>) -> Self {
        Self {
            story_id,
            title: title.into(),
            created,
        }
    }
}

/// Full news story text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsStory {
    pub story_id: StoryId,
    pub headline: String,
    pub body: String,
}

impl NewsStory {
    pub fn new(
        story_id: StoryId,
        headline: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            story_id,
            headline: headline.into(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_row_looks_up_field_values() {
        let ric = Ric::parse("THB=").expect("ric");
        let bid = FieldId::parse("BID").expect("field");
        let row = SnapshotRow::new(
            ric,
            vec![FieldEntry::new(bid.clone(), FieldValue::Number(33.2))],
        );

        assert_eq!(row.value(&bid), Some(&FieldValue::Number(33.2)));
        let ask = FieldId::parse("ASK").expect("field");
        assert_eq!(row.value(&ask), None);
    }

    #[test]
    fn parses_story_id() {
        let id = StoryId::parse("urn:newsml:reuters.com:20251110:nNRA1:1").expect("story id");
        assert!(id.as_str().starts_with("urn:newsml"));
    }

    #[test]
    fn rejects_story_id_with_whitespace() {
        let err = StoryId::parse("urn:newsml: broken").expect_err("must fail");
        assert!(matches!(err, ValidationError::StoryIdWhitespace));
    }
}
