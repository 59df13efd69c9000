//! Static index client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use tessera_core::{Error, Result};

use crate::fetch::{IndexClient, IndexResponse};

/// Index client that serves canned responses by URL.
///
/// URLs without a canned response fail as if the host were unreachable.
/// Every request is recorded so tests can assert on fetch order.
///
/// # Examples
///
/// ```
/// use tessera_listing::{IndexResponse, StaticIndexClient};
///
/// let client = StaticIndexClient::new()
///     .with_response("/query-index.json", IndexResponse::new(200, r#"{"data":[]}"#));
/// ```
#[derive(Clone, Default)]
pub struct StaticIndexClient {
    responses: HashMap<String, IndexResponse>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticIndexClient {
    /// Creates a client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for `url`.
    pub fn with_response(mut self, url: impl Into<String>, response: IndexResponse) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    /// Serve `body` with status 200 for `url`.
    pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, IndexResponse::new(200, body))
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl IndexClient for StaticIndexClient {
    async fn get(&self, url: &str) -> Result<IndexResponse> {
        self.requests.lock().await.push(url.to_string());

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::fetch(url, "connection refused"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_client_serves_canned() {
        let client = StaticIndexClient::new().with_json("/a.json", "{}");
        let response = client.get("/a.json").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_static_client_unknown_url_fails() {
        let client = StaticIndexClient::new();
        let err = client.get("/missing.json").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_static_client_clone_shares_log() {
        let client = StaticIndexClient::new().with_json("/a.json", "{}");
        let clone = client.clone();
        clone.get("/a.json").await.unwrap();
        client.get("/b.json").await.unwrap_err();
        assert_eq!(client.requests().await, vec!["/a.json", "/b.json"]);
    }
}
