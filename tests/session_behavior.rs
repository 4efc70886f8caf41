//! Behavior-driven tests for the session lifecycle.
//!
//! These tests verify HOW the session moves through its states: what a
//! successful open looks like on the wire, what a rejected credential does
//! to the observable state, and when close is a no-op.

use ricline_tests::{ok_json, status, test_config, Arc, ScriptedHttpClient, TOKEN_OK};

use ricline_core::{HttpMethod, OpenState, Session};

// =============================================================================
// Session: Open
// =============================================================================

#[tokio::test]
async fn when_the_token_grant_succeeds_the_session_reports_opened() {
    // Given: a token endpoint that accepts the credentials
    let client = Arc::new(ScriptedHttpClient::new(vec![ok_json(TOKEN_OK)]));
    let session = Session::new(test_config(), client.clone());

    // When: the session is opened
    let state = session.open().await.expect("open should not error");

    // Then: the state is Opened and exactly one password grant was sent
    assert_eq!(state, OpenState::Opened);
    assert_eq!(session.open_state(), OpenState::Opened);

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert!(requests[0].url.ends_with("/auth/oauth2/v1/token"));
    let body = requests[0].body.as_deref().expect("grant body");
    assert!(body.contains("grant_type=password"));
    assert!(body.contains("username=GE-A-00000000-1"));
}

#[tokio::test]
async fn when_credentials_are_rejected_the_session_stays_pending() {
    // Given: a token endpoint that rejects the credentials
    let client = Arc::new(ScriptedHttpClient::new(vec![status(400)]));
    let session = Session::new(test_config(), client);

    // When: the session is opened
    let state = session.open().await.expect("rejection is not a transport error");

    // Then: the session reports a non-Opened state instead of an error,
    // which is what callers gate retrieval on
    assert_eq!(state, OpenState::Pending);
    assert_eq!(session.open_state(), OpenState::Pending);
}

#[tokio::test]
async fn grant_bodies_carry_the_app_key_but_never_leak_into_urls() {
    let client = Arc::new(ScriptedHttpClient::new(vec![ok_json(TOKEN_OK)]));
    let session = Session::new(test_config(), client.clone());
    session.open().await.expect("open should succeed");

    let requests = client.recorded_requests();
    let body = requests[0].body.as_deref().expect("grant body");
    assert!(body.contains("client_id=app-key"));
    assert!(!requests[0].url.contains("secret"));
}

// =============================================================================
// Session: Close
// =============================================================================

#[tokio::test]
async fn closing_an_opened_session_moves_it_to_closed() {
    let client = Arc::new(ScriptedHttpClient::new(vec![ok_json(TOKEN_OK)]));
    let session = Session::new(test_config(), client);
    session.open().await.expect("open should succeed");

    session.close();
    assert_eq!(session.open_state(), OpenState::Closed);
}

#[tokio::test]
async fn closing_a_never_opened_session_is_a_no_op() {
    let client = Arc::new(ScriptedHttpClient::new(Vec::new()));
    let session = Session::new(test_config(), client.clone());

    session.close();

    assert_eq!(session.open_state(), OpenState::Pending);
    assert!(client.recorded_requests().is_empty());
}

// =============================================================================
// Session: Token invalidation
// =============================================================================

#[tokio::test]
async fn invalidated_tokens_trigger_a_fresh_password_grant() {
    // Given: an opened session whose token has been invalidated (the
    // access layer does this after a 401)
    let client = Arc::new(ScriptedHttpClient::new(vec![
        ok_json(TOKEN_OK),
        ok_json(TOKEN_OK),
    ]));
    let session = Session::new(test_config(), client.clone());
    session.open().await.expect("open should succeed");
    session.invalidate_token();

    // When: the next bearer token is requested
    let auth = session.bearer().await.expect("bearer should re-authenticate");

    // Then: a second password grant went out
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    let body = requests[1].body.as_deref().expect("grant body");
    assert!(body.contains("grant_type=password"));
    assert!(matches!(auth, ricline_core::HttpAuth::BearerToken(_)));
}

#[tokio::test]
async fn a_fresh_token_is_reused_without_extra_grants() {
    let client = Arc::new(ScriptedHttpClient::new(vec![ok_json(TOKEN_OK)]));
    let session = Session::new(test_config(), client.clone());
    session.open().await.expect("open should succeed");

    session.bearer().await.expect("bearer");
    session.bearer().await.expect("bearer");

    // Only the open-time grant hit the wire.
    assert_eq!(client.recorded_requests().len(), 1);
}
