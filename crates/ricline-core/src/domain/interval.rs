use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Summarization interval for historical interday series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryInterval {
    Daily,
    Weekly,
    Monthly,
}

impl HistoryInterval {
    /// Parse a user-facing interval name.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(ValidationError::UnknownInterval {
                value: other.to_owned(),
            }),
        }
    }

    /// ISO 8601 duration code used by the interday-summaries endpoint.
    pub const fn platform_code(self) -> &'static str {
        match self {
            Self::Daily => "P1D",
            Self::Weekly => "P1W",
            Self::Monthly => "P1M",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl Display for HistoryInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date range for historical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a pair of `YYYY-MM-DD` dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_interval_names() {
        assert_eq!(
            HistoryInterval::parse("Weekly").expect("interval"),
            HistoryInterval::Weekly
        );
        assert_eq!(HistoryInterval::Weekly.platform_code(), "P1W");
    }

    #[test]
    fn rejects_unknown_interval() {
        let err = HistoryInterval::parse("hourly").expect_err("must fail");
        assert!(matches!(err, ValidationError::UnknownInterval { .. }));
    }

    #[test]
    fn rejects_inverted_date_range() {
        let err = DateRange::parse("2025-11-10", "2025-10-01").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn parses_date_range() {
        let range = DateRange::parse("2025-10-01", "2025-11-10").expect("range");
        assert!(range.start < range.end);
    }
}
