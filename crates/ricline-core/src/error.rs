use thiserror::Error;

/// Domain construction failures.
///
/// Every domain type validates its invariants at construction time and
/// reports the first violation through one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("instrument code must not be empty")]
    EmptyRic,

    #[error("instrument code is {len} chars, maximum is {max}")]
    RicTooLong { len: usize, max: usize },

    #[error("instrument code must start with a letter or digit, found '{ch}'")]
    RicInvalidStart { ch: char },

    #[error("instrument code contains invalid char '{ch}' at index {index}")]
    RicInvalidChar { ch: char, index: usize },

    #[error("field mnemonic must not be empty")]
    EmptyField,

    #[error("field mnemonic is {len} chars, maximum is {max}")]
    FieldTooLong { len: usize, max: usize },

    #[error("field mnemonic must start with a letter, found '{ch}'")]
    FieldInvalidStart { ch: char },

    #[error("field mnemonic contains invalid char '{ch}' at index {index}")]
    FieldInvalidChar { ch: char, index: usize },

    #[error("story id must not be empty")]
    EmptyStoryId,

    #[error("story id is {len} chars, maximum is {max}")]
    StoryIdTooLong { len: usize, max: usize },

    #[error("story id must not contain whitespace")]
    StoryIdWhitespace,

    #[error("timestamp must be UTC")]
    TimestampNotUtc,

    #[error("could not parse timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("could not parse date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("date range start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("unknown interval '{value}' (expected daily, weekly or monthly)")]
    UnknownInterval { value: String },
}
