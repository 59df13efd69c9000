//! Index retrieval.
//!
//! Candidate URLs are tried strictly in order, one request at a time. The
//! first candidate that answers with a 2xx status and a JSON body holding a
//! `data` array wins; everything else moves on to the next candidate.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use tessera_core::{Error, Result, slugify};

use crate::config::{ListingConfig, keys};
use crate::item::ContentItem;

/// Canonical index path used when nothing else is configured.
pub const DEFAULT_INDEX_PATH: &str = "/query-index.json";

// ============================================================================
// Client abstraction
// ============================================================================

/// A raw answer from an index endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl IndexResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over how index documents are requested.
///
/// Implementations return `Err` only when no HTTP answer was obtained;
/// non-2xx statuses are returned as responses.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Issue a GET for `url` (absolute or site-relative).
    async fn get(&self, url: &str) -> Result<IndexResponse>;
}

/// [`IndexClient`] backed by `reqwest`, resolving site-relative paths
/// against a base URL.
pub struct HttpIndexClient {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl HttpIndexClient {
    /// Create a client for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `base_url` is not a valid URL or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{base_url}': {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("HTTP client: {e}")))?;

        Ok(Self { base_url, client })
    }

    /// Base URL used for site-relative paths.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolve `url` against the base URL.
    pub fn resolve(&self, url: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(url)
            .map_err(|e| Error::config(format!("Invalid index URL '{url}': {e}")))
    }
}

#[async_trait]
impl IndexClient for HttpIndexClient {
    async fn get(&self, url: &str) -> Result<IndexResponse> {
        let target = self.resolve(url)?;

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| Error::fetch(target.as_str(), e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(target.as_str(), e.to_string()))?;

        Ok(IndexResponse { status, body })
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Result of resolving the index for one block.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A candidate returned a non-empty `data` array.
    Loaded(Vec<ContentItem>),
    /// No usable items: an empty `data` array, or every candidate answered
    /// without usable data.
    Empty,
    /// Every candidate failed before producing an HTTP answer.
    Failed(Error),
}

impl FetchOutcome {
    /// Items carried by the outcome (empty unless `Loaded`).
    pub fn into_items(self) -> Vec<ContentItem> {
        match self {
            Self::Loaded(items) => items,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }
}

/// What a single candidate produced.
enum Attempt {
    Data(Vec<ContentItem>),
    Unusable(Error),
    Transport(Error),
}

/// Ordered, de-duplicated candidate URLs for a configuration.
///
/// `json-path` comes first when set. Otherwise `source` yields a derived
/// path: used verbatim when it already looks like a path or URL, else
/// `/<slug>/query-index.json`. `default_path` is always last.
pub fn candidate_urls(config: &ListingConfig, default_path: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if let Some(explicit) = config.get(keys::JSON_PATH) {
        candidates.push(explicit.to_string());
    } else if let Some(source) = config.get(keys::SOURCE) {
        if let Some(derived) = source_path(source) {
            candidates.push(derived);
        }
    }
    candidates.push(default_path.to_string());

    let mut unique = Vec::with_capacity(candidates.len());
    for url in candidates {
        if !unique.contains(&url) {
            unique.push(url);
        }
    }
    unique
}

fn source_path(source: &str) -> Option<String> {
    let is_url = source.starts_with("http://") || source.starts_with("https://");
    if is_url || source.starts_with('/') || source.ends_with(".json") {
        return Some(source.to_string());
    }
    let slug = slugify(source);
    if slug.is_empty() {
        None
    } else {
        Some(format!("/{slug}/query-index.json"))
    }
}

/// Extract items from an index body.
///
/// # Errors
///
/// - [`Error::Parse`] when the body is not JSON
/// - [`Error::InvalidData`] when there is no `data` array
pub fn parse_index(body: &str) -> Result<Vec<ContentItem>> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| Error::parse(format!("index body: {e}")))?;

    let data = payload
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::invalid_data("index has no `data` array"))?;

    Ok(data
        .iter()
        .filter_map(Value::as_object)
        .map(ContentItem::from_json_object)
        .collect())
}

async fn attempt<C: IndexClient + ?Sized>(client: &C, url: &str) -> Attempt {
    let response = match client.get(url).await {
        Ok(response) => response,
        Err(e) => return Attempt::Transport(e),
    };

    if !response.is_success() {
        return Attempt::Unusable(Error::status(url, response.status));
    }

    match parse_index(&response.body) {
        Ok(items) => Attempt::Data(items),
        Err(e) if e.is_transport() => Attempt::Transport(e),
        Err(e) => Attempt::Unusable(e),
    }
}

/// Resolve the items for a block by trying each candidate in order.
pub async fn resolve_index<C: IndexClient + ?Sized>(
    client: &C,
    config: &ListingConfig,
    default_path: &str,
) -> FetchOutcome {
    let candidates = candidate_urls(config, default_path);
    let mut answered = false;
    let mut last_error = None;

    for url in &candidates {
        match attempt(client, url).await {
            Attempt::Data(items) => {
                tracing::debug!(url = %url, count = items.len(), "index loaded");
                return if items.is_empty() {
                    FetchOutcome::Empty
                } else {
                    FetchOutcome::Loaded(items)
                };
            }
            Attempt::Unusable(e) => {
                tracing::debug!(url = %url, error = %e, "index candidate unusable");
                answered = true;
                last_error = Some(e);
            }
            Attempt::Transport(e) => {
                tracing::debug!(url = %url, error = %e, "index candidate failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !answered => FetchOutcome::Failed(e),
        _ => {
            tracing::warn!(candidates = ?candidates, "no index candidate returned data");
            FetchOutcome::Empty
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::StaticIndexClient;

    const INDEX: &str = r#"{"data":[{"title":"A","path":"/a"},{"title":"B","path":"/b"}]}"#;

    // ------------------------------------------------------------------------
    // Candidates
    // ------------------------------------------------------------------------

    #[test]
    fn test_candidates_default_only() {
        let urls = candidate_urls(&ListingConfig::new(), DEFAULT_INDEX_PATH);
        assert_eq!(urls, vec!["/query-index.json"]);
    }

    #[test]
    fn test_candidates_explicit_json_path() {
        let config = ListingConfig::new()
            .with("json-path", "/magazine.json")
            .with("source", "ignored");
        let urls = candidate_urls(&config, DEFAULT_INDEX_PATH);
        assert_eq!(urls, vec!["/magazine.json", "/query-index.json"]);
    }

    #[test]
    fn test_candidates_source_derived() {
        let config = ListingConfig::new().with("source", "Adventure Trips");
        let urls = candidate_urls(&config, DEFAULT_INDEX_PATH);
        assert_eq!(
            urls,
            vec!["/adventure-trips/query-index.json", "/query-index.json"]
        );

        let config = ListingConfig::new().with("source", "/trips.json");
        let urls = candidate_urls(&config, DEFAULT_INDEX_PATH);
        assert_eq!(urls, vec!["/trips.json", "/query-index.json"]);
    }

    #[test]
    fn test_candidates_source_named_like_a_scheme() {
        for (source, expected) in [
            ("httpdocs", "/httpdocs/query-index.json"),
            ("https-guides", "/https-guides/query-index.json"),
            ("https://cdn.example.com/trips", "https://cdn.example.com/trips"),
            ("http://example.com/index", "http://example.com/index"),
        ] {
            let config = ListingConfig::new().with("source", source);
            let urls = candidate_urls(&config, DEFAULT_INDEX_PATH);
            assert_eq!(urls, vec![expected, "/query-index.json"], "source {source}");
        }
    }

    #[test]
    fn test_candidates_deduplicated() {
        let config = ListingConfig::new().with("json-path", "/query-index.json");
        let urls = candidate_urls(&config, DEFAULT_INDEX_PATH);
        assert_eq!(urls, vec!["/query-index.json"]);
    }

    // ------------------------------------------------------------------------
    // parse_index
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_index_items() {
        let items = parse_index(INDEX).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].path(), "/b");
    }

    #[test]
    fn test_parse_index_skips_non_objects() {
        let items = parse_index(r#"{"data":[1,"x",{"title":"ok"}]}"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_index_errors() {
        assert!(matches!(parse_index("<html>"), Err(Error::Parse(_))));
        assert!(matches!(
            parse_index(r#"{"data":{"a":1}}"#),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(parse_index(r#"[1,2]"#), Err(Error::InvalidData(_))));
    }

    // ------------------------------------------------------------------------
    // resolve_index
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_resolve_first_candidate_wins() {
        let client = StaticIndexClient::new()
            .with_response("/magazine.json", IndexResponse::new(200, INDEX))
            .with_response("/query-index.json", IndexResponse::new(200, r#"{"data":[]}"#));
        let config = ListingConfig::new().with("json-path", "/magazine.json");

        let outcome = resolve_index(&client, &config, DEFAULT_INDEX_PATH).await;
        assert_eq!(outcome.into_items().len(), 2);
        assert_eq!(client.requests().await, vec!["/magazine.json"]);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_on_status() {
        let client = StaticIndexClient::new()
            .with_response("/magazine.json", IndexResponse::new(404, "not found"))
            .with_response("/query-index.json", IndexResponse::new(200, INDEX));
        let config = ListingConfig::new().with("json-path", "/magazine.json");

        let outcome = resolve_index(&client, &config, DEFAULT_INDEX_PATH).await;
        assert!(matches!(outcome, FetchOutcome::Loaded(ref items) if items.len() == 2));
        assert_eq!(
            client.requests().await,
            vec!["/magazine.json", "/query-index.json"]
        );
    }

    #[tokio::test]
    async fn test_resolve_falls_back_on_missing_data() {
        let client = StaticIndexClient::new()
            .with_response("/magazine.json", IndexResponse::new(200, r#"{"rows":[]}"#))
            .with_response("/query-index.json", IndexResponse::new(200, INDEX));
        let config = ListingConfig::new().with("json-path", "/magazine.json");

        let outcome = resolve_index(&client, &config, DEFAULT_INDEX_PATH).await;
        assert_eq!(outcome.into_items().len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_no_usable_data_is_empty() {
        let client = StaticIndexClient::new()
            .with_response("/query-index.json", IndexResponse::new(500, "oops"));

        let outcome = resolve_index(&client, &ListingConfig::new(), DEFAULT_INDEX_PATH).await;
        assert!(matches!(outcome, FetchOutcome::Empty));
    }

    #[tokio::test]
    async fn test_resolve_empty_data_is_empty() {
        let client = StaticIndexClient::new()
            .with_response("/query-index.json", IndexResponse::new(200, r#"{"data":[]}"#));

        let outcome = resolve_index(&client, &ListingConfig::new(), DEFAULT_INDEX_PATH).await;
        assert!(matches!(outcome, FetchOutcome::Empty));
    }

    #[tokio::test]
    async fn test_resolve_all_transport_failures_is_failed() {
        let client = StaticIndexClient::new()
            .with_response("/query-index.json", IndexResponse::new(200, "<html>not json</html>"));
        let config = ListingConfig::new().with("json-path", "/unreachable.json");

        let outcome = resolve_index(&client, &config, DEFAULT_INDEX_PATH).await;
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert_eq!(client.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_mixed_failures_is_empty() {
        let client = StaticIndexClient::new()
            .with_response("/query-index.json", IndexResponse::new(403, "forbidden"));
        let config = ListingConfig::new().with("json-path", "/unreachable.json");

        let outcome = resolve_index(&client, &config, DEFAULT_INDEX_PATH).await;
        assert!(matches!(outcome, FetchOutcome::Empty));
    }

    #[test]
    fn test_http_client_resolve() {
        let client = HttpIndexClient::new("https://example.com/us/en/", None).unwrap();
        assert_eq!(
            client.resolve("/query-index.json").unwrap().as_str(),
            "https://example.com/query-index.json"
        );
        assert_eq!(
            client.resolve("https://cdn.example.com/a.json").unwrap().as_str(),
            "https://cdn.example.com/a.json"
        );
    }

    #[test]
    fn test_http_client_invalid_base() {
        assert!(matches!(
            HttpIndexClient::new("not a url", None),
            Err(Error::Config(_))
        ));
    }
}
