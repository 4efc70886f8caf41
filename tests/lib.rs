// Shared fixtures for session and access behavior tests
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use ricline_core::{HttpClient, HttpError, HttpRequest, HttpResponse, PlatformConfig};

pub use std::sync::Arc;

/// Token-grant success payload, as the platform serializes it
/// (`expires_in` is a string on the wire).
pub const TOKEN_OK: &str =
    r#"{"access_token":"tok-1","refresh_token":"ref-1","expires_in":"600","token_type":"Bearer"}"#;

/// Scripted transport: pops one canned response per call and records every
/// request for later assertions.
#[derive(Debug)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self
            .responses
            .lock()
            .expect("response script should not be poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok_json("{}")));
        Box::pin(async move { response })
    }
}

pub fn test_config() -> PlatformConfig {
    PlatformConfig {
        app_key: String::from("app-key"),
        machine_id: String::from("GE-A-00000000-1"),
        password: String::from("secret"),
        base_url: String::from("https://api.example.test"),
        token_url_override: None,
        timeout_ms: 3_000,
    }
}

pub fn status(status: u16) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse {
        status,
        body: String::new(),
    })
}

pub fn ok_json(body: &str) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::ok_json(body))
}
