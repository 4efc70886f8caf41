use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::access::{
    AccessError, DataAccess, Endpoint, HeadlineBatch, HeadlinesRequest, HistoryBatch,
    HistoryRequest, SnapshotBatch, SnapshotRequest, StoryRequest,
};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::session::{OpenState, Session};
use crate::{
    parse_date, FieldEntry, FieldId, FieldValue, Headline, HistoryRow, HistorySeries, NewsStory,
    Ric, SnapshotRow, StoryId, UtcDateTime,
};

const SNAPSHOT_PATH: &str = "data/pricing/snapshots/v1/";
const INTERDAY_PATH: &str = "data/historical-pricing/v1/views/interday-summaries";
const HEADLINES_PATH: &str = "data/news/v1/headlines";
const STORIES_PATH: &str = "data/news/v1/stories";

/// Access layer over the platform's REST surface.
///
/// Every operation is gated on the backing session being `Opened`, carries
/// the session's bearer token, and retries exactly once after a 401 with a
/// freshly acquired token.
pub struct PlatformSource {
    session: Arc<Session>,
    http_client: Arc<dyn HttpClient>,
}

impl PlatformSource {
    pub fn new(session: Arc<Session>, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            session,
            http_client,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn ensure_open(&self, endpoint: Endpoint) -> Result<(), AccessError> {
        if self.session.open_state() != OpenState::Opened {
            return Err(AccessError::session_not_open(endpoint));
        }
        Ok(())
    }

    /// Authenticated GET with a single refresh retry on 401.
    async fn fetch_authorized(&self, endpoint: Endpoint, url: &str) -> Result<String, AccessError> {
        let auth = self.session.bearer().await?;
        let timeout_ms = self.session.config().timeout_ms;

        let request = HttpRequest::get(url)
            .with_auth(&auth)
            .with_timeout_ms(timeout_ms);
        let response = self.execute(request).await?;

        if response.status == 401 {
            self.session.invalidate_token();
            let auth = self.session.bearer().await?;

            let retry = HttpRequest::get(url)
                .with_auth(&auth)
                .with_timeout_ms(timeout_ms);
            let retry_response = self.execute(retry).await?;

            if retry_response.status == 401 {
                return Err(AccessError::unauthorized(format!(
                    "'{endpoint}' rejected after token refresh"
                )));
            }
            return Self::into_body(endpoint, retry_response);
        }

        Self::into_body(endpoint, response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AccessError> {
        let url = request.url.clone();
        let response = self.http_client.execute(request).await.map_err(|error| {
            AccessError::unavailable(format!("platform transport error: {}", error.message()))
        })?;
        debug!(status = response.status, %url, "platform call completed");
        Ok(response)
    }

    fn into_body(endpoint: Endpoint, response: HttpResponse) -> Result<String, AccessError> {
        match response.status {
            _ if response.is_success() => Ok(response.body),
            429 => Err(AccessError::rate_limited(format!(
                "'{endpoint}' throttled by the platform (status 429)"
            ))),
            status if status >= 500 => Err(AccessError::unavailable(format!(
                "platform returned status {status} for '{endpoint}'"
            ))),
            status => Err(AccessError::invalid_request(format!(
                "platform rejected '{endpoint}' with status {status}"
            ))),
        }
    }

    fn snapshot_url(&self, req: &SnapshotRequest) -> String {
        let universe = join_rics(&req.rics);
        let fields = join_fields(&req.fields);
        format!(
            "{}?universe={}&fields={}",
            self.session.config().data_url(SNAPSHOT_PATH),
            urlencoding::encode(&universe),
            urlencoding::encode(&fields),
        )
    }

    fn interday_url(&self, req: &HistoryRequest, ric: &Ric) -> String {
        let mut url = format!(
            "{}/{}?interval={}&count={}&fields={}",
            self.session.config().data_url(INTERDAY_PATH),
            urlencoding::encode(ric.as_str()),
            req.interval.platform_code(),
            req.count,
            urlencoding::encode(&join_fields(&req.fields)),
        );
        if let Some(range) = req.range {
            url.push_str(&format!("&start={}&end={}", range.start, range.end));
        }
        url
    }

    fn headlines_url(&self, req: &HeadlinesRequest) -> String {
        format!(
            "{}?query={}&limit={}",
            self.session.config().data_url(HEADLINES_PATH),
            urlencoding::encode(&req.query),
            req.count,
        )
    }

    fn story_url(&self, story_id: &StoryId) -> String {
        format!(
            "{}/{}",
            self.session.config().data_url(STORIES_PATH),
            urlencoding::encode(story_id.as_str()),
        )
    }
}

impl DataAccess for PlatformSource {
    fn snapshot<'a>(
        &'a self,
        req: SnapshotRequest,
    ) -> Pin<Box<dyn Future<Output = Result<SnapshotBatch, AccessError>> + Send + 'a>> {
        Box::pin(async move {
            self.ensure_open(Endpoint::Snapshot)?;

            let url = self.snapshot_url(&req);
            let body = self.fetch_authorized(Endpoint::Snapshot, &url).await?;
            parse_snapshot_response(&body, &req)
        })
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HistoryBatch, AccessError>> + Send + 'a>> {
        Box::pin(async move {
            self.ensure_open(Endpoint::History)?;

            // One interday view call per instrument, strictly sequential.
            let mut series = Vec::with_capacity(req.rics.len());
            for ric in &req.rics {
                let url = self.interday_url(&req, ric);
                let body = self.fetch_authorized(Endpoint::History, &url).await?;
                series.push(parse_interday_response(&body, ric, &req)?);
            }

            Ok(HistoryBatch {
                fields: req.fields,
                series,
            })
        })
    }

    fn headlines<'a>(
        &'a self,
        req: HeadlinesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HeadlineBatch, AccessError>> + Send + 'a>> {
        Box::pin(async move {
            self.ensure_open(Endpoint::Headlines)?;

            let url = self.headlines_url(&req);
            let body = self.fetch_authorized(Endpoint::Headlines, &url).await?;
            parse_headlines_response(&body, &req)
        })
    }

    fn story<'a>(
        &'a self,
        req: StoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<NewsStory, AccessError>> + Send + 'a>> {
        Box::pin(async move {
            self.ensure_open(Endpoint::Story)?;

            let url = self.story_url(&req.story_id);
            let body = self.fetch_authorized(Endpoint::Story, &url).await?;
            parse_story_response(&body, req.story_id)
        })
    }
}

fn join_rics(rics: &[Ric]) -> String {
    rics.iter()
        .map(Ric::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn join_fields(fields: &[FieldId]) -> String {
    fields
        .iter()
        .map(FieldId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Wire payloads and normalization
// ============================================================================

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(rename = "Key")]
    key: SnapshotKey,
    #[serde(rename = "Fields", default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SnapshotKey {
    #[serde(rename = "Name")]
    name: String,
}

fn parse_snapshot_response(
    body: &str,
    req: &SnapshotRequest,
) -> Result<SnapshotBatch, AccessError> {
    let entries: Vec<SnapshotEntry> = serde_json::from_str(body).map_err(|error| {
        AccessError::internal(format!("could not parse snapshot response: {error}"))
    })?;

    // Rows come back in request order; fields an instrument does not carry
    // stay in the row as Missing so columns line up.
    let rows = req
        .rics
        .iter()
        .map(|ric| {
            let entry = entries
                .iter()
                .find(|entry| entry.key.name.eq_ignore_ascii_case(ric.as_str()));
            let fields = req
                .fields
                .iter()
                .map(|field| {
                    let value = entry
                        .and_then(|entry| entry.fields.get(field.as_str()))
                        .map(FieldValue::from_json)
                        .unwrap_or(FieldValue::Missing);
                    FieldEntry::new(field.clone(), value)
                })
                .collect();
            SnapshotRow::new(ric.clone(), fields)
        })
        .collect();

    Ok(SnapshotBatch {
        fields: req.fields.clone(),
        rows,
    })
}

#[derive(Debug, Deserialize)]
struct InterdayView {
    #[serde(default)]
    headers: Vec<InterdayHeader>,
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct InterdayHeader {
    name: String,
}

fn parse_interday_response(
    body: &str,
    ric: &Ric,
    req: &HistoryRequest,
) -> Result<HistorySeries, AccessError> {
    let views: Vec<InterdayView> = serde_json::from_str(body).map_err(|error| {
        AccessError::internal(format!("could not parse interday response: {error}"))
    })?;

    // An instrument with no summaries in range yields an empty series.
    let Some(view) = views.first() else {
        return Ok(HistorySeries::new(ric.clone(), req.interval, Vec::new()));
    };

    let date_column = view
        .headers
        .iter()
        .position(|header| header.name.eq_ignore_ascii_case("DATE"))
        .ok_or_else(|| {
            AccessError::internal("interday response is missing the DATE column")
        })?;

    let field_columns: Vec<Option<usize>> = req
        .fields
        .iter()
        .map(|field| {
            view.headers
                .iter()
                .position(|header| header.name.eq_ignore_ascii_case(field.as_str()))
        })
        .collect();

    let mut rows = Vec::with_capacity(view.data.len());
    for record in &view.data {
        let raw_date = record
            .get(date_column)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| AccessError::internal("interday row is missing its date"))?;
        let date = parse_date(raw_date)
            .map_err(|error| AccessError::internal(format!("interday row date: {error}")))?;

        let fields = req
            .fields
            .iter()
            .zip(&field_columns)
            .map(|(field, column)| {
                let value = column
                    .and_then(|index| record.get(index))
                    .map(FieldValue::from_json)
                    .unwrap_or(FieldValue::Missing);
                FieldEntry::new(field.clone(), value)
            })
            .collect();

        rows.push(HistoryRow::new(date, fields));
    }

    Ok(HistorySeries::new(ric.clone(), req.interval, rows))
}

#[derive(Debug, Deserialize)]
struct HeadlinesEnvelope {
    #[serde(default)]
    data: Vec<HeadlineEntry>,
}

#[derive(Debug, Deserialize)]
struct HeadlineEntry {
    #[serde(rename = "storyId")]
    story_id: String,
    #[serde(rename = "newsItem")]
    news_item: NewsItem,
}

#[derive(Debug, Deserialize, Default)]
struct NewsItem {
    #[serde(rename = "itemMeta", default)]
    item_meta: ItemMeta,
    #[serde(rename = "contentSet", default)]
    content_set: ContentSet,
}

#[derive(Debug, Deserialize, Default)]
struct ItemMeta {
    #[serde(default)]
    title: Vec<WireText>,
    #[serde(rename = "versionCreated", default)]
    version_created: Option<WireText>,
}

#[derive(Debug, Deserialize, Default)]
struct ContentSet {
    #[serde(rename = "inlineData", default)]
    inline_data: Vec<WireText>,
}

/// NewsML wraps scalar values as `{"$": "..."}`.
#[derive(Debug, Deserialize, Default)]
struct WireText {
    #[serde(rename = "$", default)]
    value: String,
}

fn parse_headlines_response(
    body: &str,
    req: &HeadlinesRequest,
) -> Result<HeadlineBatch, AccessError> {
    let envelope: HeadlinesEnvelope = serde_json::from_str(body).map_err(|error| {
        AccessError::internal(format!("could not parse headlines response: {error}"))
    })?;

    let headlines = envelope
        .data
        .into_iter()
        .filter_map(|entry| {
            let story_id = StoryId::parse(&entry.story_id).ok()?;
            let title = entry
                .news_item
                .item_meta
                .title
                .first()
                .map(|text| text.value.clone())
                .unwrap_or_default();
            let created = entry
                .news_item
                .item_meta
                .version_created
                .and_then(|text| UtcDateTime::parse(&text.value).ok());
            Some(Headline::new(story_id, title, created))
        })
        .take(req.count)
        .collect();

    Ok(HeadlineBatch {
        query: req.query.clone(),
        headlines,
    })
}

#[derive(Debug, Deserialize)]
struct StoryEnvelope {
    #[serde(rename = "newsItem")]
    news_item: NewsItem,
}

fn parse_story_response(body: &str, story_id: StoryId) -> Result<NewsStory, AccessError> {
    let envelope: StoryEnvelope = serde_json::from_str(body).map_err(|error| {
        AccessError::internal(format!("could not parse story response: {error}"))
    })?;

    let headline = envelope
        .news_item
        .item_meta
        .title
        .first()
        .map(|text| text.value.clone())
        .unwrap_or_default();
    let body_text = envelope
        .news_item
        .content_set
        .inline_data
        .first()
        .map(|text| text.value.clone())
        .unwrap_or_default();

    Ok(NewsStory::new(story_id, headline, body_text))
}
