//! Data access contract and request/response types.
//!
//! This module defines the retrieval seam of the crate: the [`DataAccess`]
//! trait with one method per retrieval operation, plus the validated
//! request payloads and normalized batch types each operation works with.
//!
//! # Operations
//!
//! | Operation | Request | Response | Description |
//! |-----------|---------|----------|-------------|
//! | Snapshot | [`SnapshotRequest`] | [`SnapshotBatch`] | Real-time snapshot quotes |
//! | History | [`HistoryRequest`] | [`HistoryBatch`] | Historical interday series |
//! | Headlines | [`HeadlinesRequest`] | [`HeadlineBatch`] | News headline search |
//! | Story | [`StoryRequest`] | [`NewsStory`] | Full news story text |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{
    DateRange, FieldId, Headline, HistoryInterval, HistorySeries, NewsStory, Ric, SnapshotRow,
    StoryId,
};

/// Data endpoint type used for gating checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Snapshot,
    History,
    Headlines,
    Story,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::History => "history",
            Self::Headlines => "headlines",
            Self::Story => "story",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access-layer error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    SessionNotOpen,
    Unauthorized,
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured access error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    kind: AccessErrorKind,
    message: String,
    retryable: bool,
}

impl AccessError {
    pub fn session_not_open(endpoint: Endpoint) -> Self {
        Self {
            kind: AccessErrorKind::SessionNotOpen,
            message: format!("session is not open; '{endpoint}' call skipped"),
            retryable: false,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: AccessErrorKind::Unauthorized,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: AccessErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: AccessErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: AccessErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: AccessErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> AccessErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            AccessErrorKind::SessionNotOpen => "access.session_not_open",
            AccessErrorKind::Unauthorized => "access.unauthorized",
            AccessErrorKind::Unavailable => "access.unavailable",
            AccessErrorKind::RateLimited => "access.rate_limited",
            AccessErrorKind::InvalidRequest => "access.invalid_request",
            AccessErrorKind::Internal => "access.internal",
        }
    }
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for AccessError {}

/// Request payload for snapshot pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub rics: Vec<Ric>,
    pub fields: Vec<FieldId>,
}

impl SnapshotRequest {
    pub fn new(rics: Vec<Ric>, fields: Vec<FieldId>) -> Result<Self, AccessError> {
        if rics.is_empty() {
            return Err(AccessError::invalid_request(
                "snapshot request must include at least one instrument",
            ));
        }
        if fields.is_empty() {
            return Err(AccessError::invalid_request(
                "snapshot request must include at least one field",
            ));
        }
        Ok(Self { rics, fields })
    }
}

/// Request payload for historical interday series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub rics: Vec<Ric>,
    pub fields: Vec<FieldId>,
    pub interval: HistoryInterval,
    pub range: Option<DateRange>,
    pub count: usize,
}

impl HistoryRequest {
    pub fn new(
        rics: Vec<Ric>,
        fields: Vec<FieldId>,
        interval: HistoryInterval,
        range: Option<DateRange>,
        count: usize,
    ) -> Result<Self, AccessError> {
        if rics.is_empty() {
            return Err(AccessError::invalid_request(
                "history request must include at least one instrument",
            ));
        }
        if fields.is_empty() {
            return Err(AccessError::invalid_request(
                "history request must include at least one field",
            ));
        }
        if count == 0 {
            return Err(AccessError::invalid_request(
                "history request count must be greater than zero",
            ));
        }
        Ok(Self {
            rics,
            fields,
            interval,
            range,
            count,
        })
    }
}

/// Request payload for news headline search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesRequest {
    pub query: String,
    pub count: usize,
}

impl HeadlinesRequest {
    pub fn new(query: impl Into<String>, count: usize) -> Result<Self, AccessError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(AccessError::invalid_request(
                "headlines query must not be empty",
            ));
        }
        if count == 0 {
            return Err(AccessError::invalid_request(
                "headlines request count must be greater than zero",
            ));
        }
        Ok(Self { query, count })
    }
}

/// Request payload for a single news story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub story_id: StoryId,
}

impl StoryRequest {
    pub fn new(story_id: StoryId) -> Self {
        Self { story_id }
    }
}

/// Normalized snapshot batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotBatch {
    pub fields: Vec<FieldId>,
    pub rows: Vec<SnapshotRow>,
}

/// Normalized history batch, one series per requested instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBatch {
    pub fields: Vec<FieldId>,
    pub series: Vec<HistorySeries>,
}

/// Normalized headline batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineBatch {
    pub query: String,
    pub headlines: Vec<Headline>,
}

/// Access-layer contract.
///
/// The platform implementation is [`PlatformSource`](crate::PlatformSource);
/// tests substitute their own implementations. The trait uses async methods
/// returning boxed futures so implementations stay object-safe.
///
/// # Session gating
///
/// Every operation MUST fail fast with
/// [`AccessError::session_not_open`] while the backing session is not in
/// the `Opened` state, without touching the network.
pub trait DataAccess: Send + Sync {
    /// Fetches snapshot quotes for the requested instruments and fields.
    fn snapshot<'a>(
        &'a self,
        req: SnapshotRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SnapshotBatch, AccessError>> + Send + 'a>>;

    /// Fetches historical interday series.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HistoryBatch, AccessError>> + Send + 'a>>;

    /// Searches news headlines.
    fn headlines<'a>(
        &'a self,
        req: HeadlinesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HeadlineBatch, AccessError>> + Send + 'a>>;

    /// Fetches one news story by id.
    fn story<'a>(
        &'a self,
        req: StoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<NewsStory, AccessError>> + Send + 'a>>;
}
