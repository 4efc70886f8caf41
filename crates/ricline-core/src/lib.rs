//! # Ricline Core
//!
//! Session lifecycle and data access layer for the ricline CLI.
//!
//! ## Overview
//!
//! This crate provides everything below the command line:
//!
//! - **Canonical domain models** for instruments, fields, interday series,
//!   and news
//! - **Session lifecycle** (open / state / close) with bearer-token
//!   management against the platform's OAuth2 token endpoint
//! - **Access layer trait** with one operation per retrieval endpoint
//! - **HTTP client abstraction** so tests run offline and deterministic
//! - **Configuration** from a JSON config file or environment variables
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`access`] | Access contract, request/response types, errors |
//! | [`config`] | Platform credentials and endpoints |
//! | [`domain`] | Domain models (Ric, FieldId, SnapshotRow, ...) |
//! | [`http_client`] | HTTP client abstraction |
//! | [`platform`] | REST implementation of the access contract |
//! | [`session`] | Session lifecycle and token management |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ricline_core::{
//!     DataAccess, FieldId, PlatformConfig, PlatformSource, ReqwestHttpClient, Ric, Session,
//!     SnapshotRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlatformConfig::from_env()?;
//!     let http_client = Arc::new(ReqwestHttpClient::new());
//!     let session = Arc::new(Session::new(config, http_client.clone()));
//!
//!     session.open().await?;
//!     let source = PlatformSource::new(session.clone(), http_client);
//!
//!     let request = SnapshotRequest::new(
//!         vec![Ric::parse("THB=")?, Ric::parse("JPY=")?],
//!         vec![FieldId::parse("BID")?, FieldId::parse("ASK")?],
//!     )?;
//!     let batch = source.snapshot(request).await?;
//!
//!     for row in &batch.rows {
//!         println!("{}: {:?}", row.ric, row.fields);
//!     }
//!
//!     session.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Domain construction returns [`ValidationError`]; access-layer calls
//! return a structured [`AccessError`] whose kind distinguishes a closed
//! session, auth rejection, throttling, and upstream availability.
//!
//! ## Security
//!
//! - Credentials come from the config file or environment only
//! - Passwords and tokens are never logged
//! - All traffic goes through the injected [`HttpClient`], TLS via reqwest

pub mod access;
pub mod config;
pub mod domain;
pub mod http_client;
pub mod platform;
pub mod session;

mod error;

// Re-export commonly used types at crate root for convenience

// Access contract and types
pub use access::{
    AccessError, AccessErrorKind, DataAccess, Endpoint, HeadlineBatch, HeadlinesRequest,
    HistoryBatch, HistoryRequest, SnapshotBatch, SnapshotRequest, StoryRequest,
};

// Configuration
pub use config::{ConfigError, PlatformConfig};

// Domain models
pub use domain::{
    parse_date, DateRange, FieldEntry, FieldId, FieldValue, Headline, HistoryInterval, HistoryRow,
    HistorySeries, NewsStory, Ric, SnapshotRow, StoryId, UtcDateTime,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

// Platform access layer
pub use platform::PlatformSource;

// Session lifecycle
pub use session::{OpenState, Session};
