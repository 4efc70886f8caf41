//! Platform session lifecycle.
//!
//! A [`Session`] owns all platform authentication state: it exchanges
//! credentials for a bearer token at open time, hands out fresh tokens to
//! the access layer, refreshes them near expiry, and forgets them on
//! close.
//!
//! State machine: `Pending` → (`open`) → `Opened` → (`close`) → `Closed`.
//! A rejected credential leaves the session in `Pending`; callers observe
//! that through [`Session::open_state`] and skip data retrieval.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{info, warn};

use crate::access::AccessError;
use crate::config::PlatformConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};

/// Seconds before expiry at which a token is treated as stale.
const EXPIRY_SLACK: Duration = Duration::from_secs(30);

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenState {
    Pending,
    Opened,
    Closed,
}

impl OpenState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Opened => "Opened",
            Self::Closed => "Closed",
        }
    }
}

impl Display for OpenState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
struct TokenState {
    access_token: String,
    refresh_token: String,
    expires_at: Instant,
}

impl TokenState {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_SLACK < self.expires_at
    }
}

enum Grant {
    Password,
    Refresh(String),
}

/// Vendor-style session handle: opened once, closed once per run.
pub struct Session {
    config: PlatformConfig,
    http_client: Arc<dyn HttpClient>,
    state: Mutex<OpenState>,
    token: Mutex<Option<TokenState>>,
}

impl Session {
    pub fn new(config: PlatformConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
            state: Mutex::new(OpenState::Pending),
            token: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Authenticate and move to `Opened`.
    ///
    /// A credential rejection is not an error at this level: the session
    /// stays `Pending` and the returned state tells the caller retrieval
    /// must be skipped. Transport failures are errors.
    pub async fn open(&self) -> Result<OpenState, AccessError> {
        match self.request_token(Grant::Password).await {
            Ok(token) => {
                *self.token.lock().expect("token lock is not poisoned") = Some(token);
                self.set_state(OpenState::Opened);
                info!(state = %OpenState::Opened, "session opened");
                Ok(OpenState::Opened)
            }
            Err(TokenError::Rejected { status }) => {
                warn!(status, "session open rejected by token endpoint");
                Ok(self.open_state())
            }
            Err(TokenError::Transport(message)) => Err(AccessError::unavailable(message)),
            Err(TokenError::Malformed(message)) => Err(AccessError::internal(message)),
        }
    }

    pub fn open_state(&self) -> OpenState {
        *self.state.lock().expect("state lock is not poisoned")
    }

    /// Forget the token and move to `Closed`. No-op unless `Opened`.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("state lock is not poisoned");
        if *state != OpenState::Opened {
            return;
        }
        *state = OpenState::Closed;
        drop(state);

        *self.token.lock().expect("token lock is not poisoned") = None;
        info!(state = %OpenState::Closed, "session closed");
    }

    /// Bearer auth for the next data call, refreshing a stale token.
    pub async fn bearer(&self) -> Result<HttpAuth, AccessError> {
        let cached = self
            .token
            .lock()
            .expect("token lock is not poisoned")
            .clone();

        let grant = match cached {
            Some(token) if token.is_fresh() => {
                return Ok(HttpAuth::BearerToken(token.access_token));
            }
            Some(token) => Grant::Refresh(token.refresh_token),
            // Token was invalidated after a 401; re-authenticate from scratch.
            None => Grant::Password,
        };

        let token = self.request_token(grant).await.map_err(|error| match error {
            TokenError::Rejected { status } => AccessError::unauthorized(format!(
                "token refresh rejected with status {status}"
            )),
            TokenError::Transport(message) => AccessError::unavailable(message),
            TokenError::Malformed(message) => AccessError::internal(message),
        })?;

        let auth = HttpAuth::BearerToken(token.access_token.clone());
        *self.token.lock().expect("token lock is not poisoned") = Some(token);
        Ok(auth)
    }

    /// Drop the cached token so the next [`Session::bearer`] call
    /// re-authenticates. Used by the access layer after a 401.
    pub fn invalidate_token(&self) {
        *self.token.lock().expect("token lock is not poisoned") = None;
    }

    fn set_state(&self, next: OpenState) {
        *self.state.lock().expect("state lock is not poisoned") = next;
    }

    async fn request_token(&self, grant: Grant) -> Result<TokenState, TokenError> {
        let body = match grant {
            Grant::Password => format!(
                "grant_type=password&username={}&password={}&client_id={}&scope=trapi&takeExclusiveSignOnControl=true",
                urlencoding::encode(&self.config.machine_id),
                urlencoding::encode(&self.config.password),
                urlencoding::encode(&self.config.app_key),
            ),
            Grant::Refresh(refresh_token) => format!(
                "grant_type=refresh_token&username={}&client_id={}&refresh_token={}",
                urlencoding::encode(&self.config.machine_id),
                urlencoding::encode(&self.config.app_key),
                urlencoding::encode(&refresh_token),
            ),
        };

        let request = HttpRequest::post(self.config.token_url())
            .with_form_body(body)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| TokenError::Transport(format!("token endpoint: {}", error.message())))?;

        if !response.is_success() {
            return Err(TokenError::Rejected {
                status: response.status,
            });
        }

        let payload: TokenPayload = serde_json::from_str(&response.body).map_err(|error| {
            TokenError::Malformed(format!("could not parse token response: {error}"))
        })?;

        let expires_in = payload.expires_in.as_secs().ok_or_else(|| {
            TokenError::Malformed(String::from("token response carries a non-numeric expires_in"))
        })?;

        Ok(TokenState {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at: Instant::now() + Duration::from_secs(expires_in),
        })
    }
}

enum TokenError {
    Rejected { status: u16 },
    Transport(String),
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
    refresh_token: String,
    expires_in: ExpiresIn,
}

/// The token endpoint serializes `expires_in` as a string; tolerate both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Number(u64),
    Text(String),
}

impl ExpiresIn {
    fn as_secs(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_in_accepts_string_and_number() {
        let number: ExpiresIn = serde_json::from_str("600").expect("number");
        assert_eq!(number.as_secs(), Some(600));

        let text: ExpiresIn = serde_json::from_str("\"600\"").expect("text");
        assert_eq!(text.as_secs(), Some(600));
    }

    #[test]
    fn fresh_token_check_respects_slack() {
        let stale = TokenState {
            access_token: String::from("t"),
            refresh_token: String::from("r"),
            expires_at: Instant::now() + Duration::from_secs(5),
        };
        assert!(!stale.is_fresh());

        let fresh = TokenState {
            expires_at: Instant::now() + Duration::from_secs(600),
            ..stale
        };
        assert!(fresh.is_fresh());
    }
}
