//! Canonical domain types for platform data.
//!
//! Strongly-typed models with construction-time validation and full serde
//! support:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ric`] | Validated instrument code |
//! | [`FieldId`] | Validated field mnemonic |
//! | [`FieldValue`] | Number / text / missing field value |
//! | [`SnapshotRow`] | Snapshot pricing row |
//! | [`HistorySeries`] | Dated interday series per instrument |
//! | [`Headline`] / [`NewsStory`] | News headline and story text |
//! | [`HistoryInterval`] | daily / weekly / monthly summarization |
//! | [`DateRange`] | Inclusive start/end date pair |
//! | [`UtcDateTime`] | UTC timestamp |

mod field;
mod interval;
mod models;
mod ric;
mod timestamp;

pub use field::{FieldId, FieldValue};
pub use interval::{parse_date, DateRange, HistoryInterval};
pub use models::{
    FieldEntry, Headline, HistoryRow, HistorySeries, NewsStory, SnapshotRow, StoryId,
};
pub use ric::Ric;
pub use timestamp::UtcDateTime;
