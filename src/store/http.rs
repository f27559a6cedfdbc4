//! # HTTP Store
//!
//! [`ResourceStore`] over the REST API:
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | GET | `/api/resources` | - |
//! | GET | `/api/resources/{id}` | - |
//! | PUT | `/api/resources/{id}` | full resource |
//! | DELETE | `/api/resources/{id}` | - |
//!
//! Non-success answers become [`StoreError::Status`], carrying the `error` string of a
//! `{"error": "..."}` body when the store sent one.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::model::{Resource, ResourceId};
use crate::store::{ResourceStore, StoreError};

const RESOURCES_PATH: &str = "/api/resources";

/// Error body a failing store may send.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the resource REST API.
#[derive(Clone, Debug)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Create a store rooted at `base_url` (scheme and host, e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a store whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, RESOURCES_PATH)
    }

    fn item_url(&self, id: ResourceId) -> String {
        format!("{}{}/{}", self.base_url, RESOURCES_PATH, id)
    }

    /// Passes success responses through and turns everything else into `StoreError::Status`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        warn!(status = status.as_u16(), ?message, "Store rejected request");
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ResourceStore for HttpStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Resource>, StoreError> {
        debug!("Sending request");
        let response = self.client.get(self.collection_url()).send().await?;
        let resources = Self::check(response).await?.json().await?;
        Ok(resources)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        debug!("Sending request");
        let response = self.client.get(self.item_url(id)).send().await?;
        let resource = Self::check(response).await?.json().await?;
        Ok(resource)
    }

    #[instrument(skip(self, resource))]
    async fn replace(&self, id: ResourceId, resource: &Resource) -> Result<(), StoreError> {
        debug!(?resource, "Sending request");
        let response = self.client.put(self.item_url(id)).json(resource).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        debug!("Sending request");
        let response = self.client.delete(self.item_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let store = HttpStore::new("http://localhost:3000/");
        assert_eq!(store.base_url(), "http://localhost:3000");
        assert_eq!(store.collection_url(), "http://localhost:3000/api/resources");
        assert_eq!(
            store.item_url(ResourceId(7)),
            "http://localhost:3000/api/resources/7"
        );
    }

    #[tokio::test]
    async fn test_unreachable_store_is_a_network_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let store = HttpStore::with_client(client, "http://127.0.0.1:9");
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Network(_)), "got {err:?}");
    }
}
