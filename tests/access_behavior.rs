//! Behavior-driven tests for the platform access layer.
//!
//! These tests verify HOW the four retrieval operations behave against
//! scripted platform payloads: gating on session state, wire-shape
//! normalization into domain types, and the sequential per-instrument
//! history flow.

use ricline_tests::{ok_json, status, test_config, Arc, ScriptedHttpClient, TOKEN_OK};

use ricline_core::{
    AccessErrorKind, DataAccess, FieldId, FieldValue, HeadlinesRequest, HistoryInterval,
    HistoryRequest, PlatformSource, Ric, Session, SnapshotRequest, StoryId, StoryRequest,
};

fn opened_source(
    responses: Vec<Result<ricline_core::HttpResponse, ricline_core::HttpError>>,
) -> (PlatformSource, Arc<ScriptedHttpClient>) {
    let mut script = vec![ok_json(TOKEN_OK)];
    script.extend(responses);
    let client = Arc::new(ScriptedHttpClient::new(script));
    let session = Arc::new(Session::new(test_config(), client.clone()));
    (PlatformSource::new(session, client.clone()), client)
}

async fn open(source: &PlatformSource) {
    source
        .session()
        .open()
        .await
        .expect("open should succeed");
}

// =============================================================================
// Access layer: Session gating
// =============================================================================

#[tokio::test]
async fn when_the_session_never_opened_every_operation_fails_fast() {
    // Given: a source whose session open was rejected
    let client = Arc::new(ScriptedHttpClient::new(vec![status(401)]));
    let session = Arc::new(Session::new(test_config(), client.clone()));
    let source = PlatformSource::new(session.clone(), client.clone());
    session.open().await.expect("rejection is not an error");

    // When: each retrieval operation is attempted
    let snapshot = source
        .snapshot(snapshot_request(&["THB="], &["BID"]))
        .await;
    let headlines = source
        .headlines(HeadlinesRequest::new("chips", 5).expect("request"))
        .await;

    // Then: every call reports SessionNotOpen and only the failed token
    // grant ever reached the wire
    assert_eq!(
        snapshot.expect_err("gated").kind(),
        AccessErrorKind::SessionNotOpen
    );
    assert_eq!(
        headlines.expect_err("gated").kind(),
        AccessErrorKind::SessionNotOpen
    );
    assert_eq!(client.recorded_requests().len(), 1);
}

#[tokio::test]
async fn when_the_session_is_closed_retrieval_is_refused_again() {
    let (source, client) = opened_source(Vec::new());
    open(&source).await;
    source.session().close();

    let error = source
        .snapshot(snapshot_request(&["THB="], &["BID"]))
        .await
        .expect_err("closed session must gate");

    assert_eq!(error.kind(), AccessErrorKind::SessionNotOpen);
    assert_eq!(client.recorded_requests().len(), 1);
}

// =============================================================================
// Access layer: Snapshot normalization
// =============================================================================

#[tokio::test]
async fn snapshot_rows_line_up_with_requested_instruments_and_fields() {
    let payload = r#"[
        {"Type":"Quote","Key":{"Name":"THB="},"Fields":{"BID":33.18,"ASK":33.21}},
        {"Type":"Quote","Key":{"Name":"JPY="},"Fields":{"BID":153.41,"ASK":153.44}}
    ]"#;
    let (source, client) = opened_source(vec![ok_json(payload)]);
    open(&source).await;

    let batch = source
        .snapshot(snapshot_request(&["THB=", "JPY="], &["BID", "ASK"]))
        .await
        .expect("snapshot");

    assert_eq!(batch.rows.len(), 2);
    let bid = FieldId::parse("BID").expect("field");
    assert_eq!(
        batch.rows[1].value(&bid),
        Some(&FieldValue::Number(153.41))
    );

    // The data call carries both universe and field lists.
    let data_request = &client.recorded_requests()[1];
    assert!(data_request.url.contains("universe=THB%3D%2CJPY%3D"));
    assert!(data_request.url.contains("fields=BID%2CASK"));
    assert_eq!(
        data_request.headers.get("authorization").map(String::as_str),
        Some("Bearer tok-1")
    );
}

// =============================================================================
// Access layer: History normalization
// =============================================================================

#[tokio::test]
async fn history_issues_one_sequential_call_per_instrument() {
    let amd = r#"[{
        "universe": {"ric": "AMD.O"},
        "interval": "P1W",
        "headers": [{"name": "DATE"}, {"name": "BID"}, {"name": "ASK"}],
        "data": [["2025-10-03", 162.1, 162.3], ["2025-10-10", 165.0, 165.4]]
    }]"#;
    let nvda = r#"[{
        "universe": {"ric": "NVDA.O"},
        "interval": "P1W",
        "headers": [{"name": "DATE"}, {"name": "BID"}, {"name": "ASK"}],
        "data": [["2025-10-03", 187.9, 188.2]]
    }]"#;
    let (source, client) = opened_source(vec![ok_json(amd), ok_json(nvda)]);
    open(&source).await;

    let request = HistoryRequest::new(
        vec![
            Ric::parse("AMD.O").expect("ric"),
            Ric::parse("NVDA.O").expect("ric"),
        ],
        vec![
            FieldId::parse("BID").expect("field"),
            FieldId::parse("ASK").expect("field"),
        ],
        HistoryInterval::Weekly,
        None,
        15,
    )
    .expect("request");

    let batch = source.history(request).await.expect("history");

    assert_eq!(batch.series.len(), 2);
    assert_eq!(batch.series[0].ric.as_str(), "AMD.O");
    assert_eq!(batch.series[0].rows.len(), 2);
    assert_eq!(batch.series[1].rows.len(), 1);
    assert_eq!(batch.series[0].rows[0].date.to_string(), "2025-10-03");

    // Token grant plus one interday call per RIC, in request order.
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].url.contains("interday-summaries/AMD.O"));
    assert!(requests[1].url.contains("interval=P1W"));
    assert!(requests[1].url.contains("count=15"));
    assert!(requests[2].url.contains("interday-summaries/NVDA.O"));
}

#[tokio::test]
async fn history_date_range_lands_in_the_query_string() {
    let empty = r#"[]"#;
    let (source, client) = opened_source(vec![ok_json(empty)]);
    open(&source).await;

    let request = HistoryRequest::new(
        vec![Ric::parse("AMD.O").expect("ric")],
        vec![FieldId::parse("BID").expect("field")],
        HistoryInterval::Weekly,
        Some(ricline_core::DateRange::parse("2025-10-01", "2025-11-10").expect("range")),
        15,
    )
    .expect("request");

    let batch = source.history(request).await.expect("history");

    // No summaries in range is a valid, empty series.
    assert_eq!(batch.series.len(), 1);
    assert!(batch.series[0].rows.is_empty());

    let url = &client.recorded_requests()[1].url;
    assert!(url.contains("start=2025-10-01"));
    assert!(url.contains("end=2025-11-10"));
}

// =============================================================================
// Access layer: News normalization
// =============================================================================

#[tokio::test]
async fn headlines_normalize_newsml_titles_and_timestamps() {
    let payload = r#"{
        "data": [
            {
                "storyId": "urn:newsml:reuters.com:20251110:nNRA1:1",
                "newsItem": {
                    "itemMeta": {
                        "title": [{"$": "Chipmaker beats estimates"}],
                        "versionCreated": {"$": "2025-11-10T08:15:00Z"}
                    }
                }
            },
            {
                "storyId": "urn:newsml:reuters.com:20251110:nNRA2:1",
                "newsItem": {
                    "itemMeta": {
                        "title": [{"$": "Guidance raised"}]
                    }
                }
            }
        ]
    }"#;
    let (source, _client) = opened_source(vec![ok_json(payload)]);
    open(&source).await;

    let batch = source
        .headlines(HeadlinesRequest::new("chips", 10).expect("request"))
        .await
        .expect("headlines");

    assert_eq!(batch.query, "chips");
    assert_eq!(batch.headlines.len(), 2);
    assert_eq!(batch.headlines[0].title, "Chipmaker beats estimates");
    assert!(batch.headlines[0].created.is_some());
    assert!(batch.headlines[1].created.is_none());
}

#[tokio::test]
async fn story_returns_headline_and_body_text() {
    let payload = r#"{
        "newsItem": {
            "itemMeta": {"title": [{"$": "Chipmaker beats estimates"}]},
            "contentSet": {"inlineData": [{"$": "Full story body."}]}
        }
    }"#;
    let (source, client) = opened_source(vec![ok_json(payload)]);
    open(&source).await;

    let story_id = StoryId::parse("urn:newsml:reuters.com:20251110:nNRA1:1").expect("story id");
    let story = source
        .story(StoryRequest::new(story_id.clone()))
        .await
        .expect("story");

    assert_eq!(story.story_id, story_id);
    assert_eq!(story.headline, "Chipmaker beats estimates");
    assert_eq!(story.body, "Full story body.");

    // Story ids are path segments, URL-encoded.
    let url = &client.recorded_requests()[1].url;
    assert!(url.contains("stories/urn%3Anewsml%3Areuters.com%3A20251110%3AnNRA1%3A1"));
}

// =============================================================================
// Access layer: Error mapping
// =============================================================================

#[tokio::test]
async fn upstream_5xx_maps_to_unavailable() {
    let (source, _client) = opened_source(vec![status(503)]);
    open(&source).await;

    let error = source
        .snapshot(snapshot_request(&["THB="], &["BID"]))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), AccessErrorKind::Unavailable);
    assert!(error.retryable());
}

#[tokio::test]
async fn upstream_4xx_maps_to_invalid_request() {
    let (source, _client) = opened_source(vec![status(400)]);
    open(&source).await;

    let error = source
        .snapshot(snapshot_request(&["THB="], &["BID"]))
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), AccessErrorKind::InvalidRequest);
    assert!(!error.retryable());
}

fn snapshot_request(rics: &[&str], fields: &[&str]) -> SnapshotRequest {
    SnapshotRequest::new(
        rics.iter()
            .map(|raw| Ric::parse(raw).expect("ric"))
            .collect(),
        fields
            .iter()
            .map(|raw| FieldId::parse(raw).expect("field"))
            .collect(),
    )
    .expect("valid request")
}
