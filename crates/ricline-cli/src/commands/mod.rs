mod headlines;
mod history;
mod snapshot;
mod story;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use ricline_core::{
    DataAccess, HttpClient, OpenState, PlatformConfig, PlatformSource, ReqwestHttpClient, Session,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Section;

pub struct CommandResult {
    pub request_id: String,
    pub data: Value,
    pub sections: Vec<Section>,
    pub warnings: Vec<String>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            request_id: Uuid::new_v4().hyphenated().to_string(),
            data,
            sections: Vec::new(),
            warnings: Vec::new(),
            latency_ms: 0,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Per-invocation session flow: open, gate on the reported state, run the
/// requested retrieval, close.
pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let mut config = PlatformConfig::load(cli.config.as_deref())?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let session = Arc::new(Session::new(config, http_client.clone()));

    let state = session.open().await?;
    let outcome = if state == OpenState::Opened {
        info!("session is opened");
        let source = PlatformSource::new(session.clone(), http_client);
        let started = Instant::now();
        let outcome = dispatch(cli, &source).await;
        let latency_ms = started.elapsed().as_millis() as u64;
        outcome.map(|result| result.with_latency(latency_ms))
    } else {
        // The session never opened; skip retrieval and fall through to close.
        warn!(state = %state, "session is not opened; skipping retrieval");
        Ok(CommandResult::ok(Value::Null)
            .with_warning(format!("session state is {state}; retrieval skipped")))
    };

    session.close();

    for warning in outcome.iter().flat_map(|result| result.warnings.iter()) {
        warn!("{warning}");
    }

    outcome
}

async fn dispatch(cli: &Cli, source: &dyn DataAccess) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Snapshot(args) => snapshot::run(args, source).await,
        Command::History(args) => history::run(args, source).await,
        Command::Headlines(args) => headlines::run(args, source).await,
        Command::Story(args) => story::run(args, source).await,
    }
}
