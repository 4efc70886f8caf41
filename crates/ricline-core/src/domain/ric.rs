use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_RIC_LEN: usize = 32;

/// Normalized Reuters Instrument Code.
///
/// RICs mix exchange tickers ("AMD.O", "NVDA.O") with currency shorthand
/// ("THB=", "JPY=") and index codes (".SPX"), so the accepted alphabet is
/// wider than a plain equity ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ric(String);

impl Ric {
    /// Parse and normalize an instrument code to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRic);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_RIC_LEN {
            return Err(ValidationError::RicTooLong {
                len,
                max: MAX_RIC_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            // Index RICs lead with a dot (".SPX"); everything else starts
            // alphanumeric.
            if !first.is_ascii_alphanumeric() && first != '.' {
                return Err(ValidationError::RicInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric()
                || matches!(ch, '.' | '=' | '-' | '^' | '/' | '_');
            if !valid {
                return Err(ValidationError::RicInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ric {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ric {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ric> for String {
    fn from(value: Ric) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ric() {
        let parsed = Ric::parse(" amd.o ").expect("ric should parse");
        assert_eq!(parsed.as_str(), "AMD.O");
    }

    #[test]
    fn accepts_currency_shorthand() {
        let parsed = Ric::parse("THB=").expect("ric should parse");
        assert_eq!(parsed.as_str(), "THB=");
    }

    #[test]
    fn accepts_index_rics() {
        let parsed = Ric::parse(".SPX").expect("ric should parse");
        assert_eq!(parsed.as_str(), ".SPX");
    }

    #[test]
    fn rejects_empty_ric() {
        let err = Ric::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyRic));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Ric::parse("THB$").expect_err("must fail");
        assert!(matches!(err, ValidationError::RicInvalidChar { .. }));
    }
}
