//! Bibliographic lookup against the Google Books volumes API
//!
//! A lookup is two requests: an `isbn:` search whose first hit gives the
//! volume id, then a fetch of that volume for its `volumeInfo`. Lookups are
//! best-effort: any transport, status or decoding failure is logged and
//! reported as "no data", never as an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    config::BooksApiConfig,
    error::{AppError, AppResult},
    models::volume::VolumeInfo,
};

/// Source of bibliographic data keyed by ISBN
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookLookup: Send + Sync {
    /// Bibliographic data for `isbn`, or `None` when nothing could be found
    async fn lookup(&self, isbn: &str) -> Option<VolumeInfo>;
}

/// Lookup used when enrichment is switched off
#[derive(Debug, Clone, Default)]
pub struct NoopLookup;

#[async_trait]
impl BookLookup for NoopLookup {
    async fn lookup(&self, _isbn: &str) -> Option<VolumeInfo> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<VolumeRef>,
}

#[derive(Debug, Deserialize)]
struct VolumeRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VolumeDetail {
    #[serde(rename = "volumeInfo", default)]
    volume_info: Option<VolumeInfo>,
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleBooksClient {
    pub fn new(config: &BooksApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("shelfkeeper-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        if self.api_key.is_empty() {
            request
        } else {
            request.query(&[("key", self.api_key.as_str())])
        }
    }

    async fn fetch(&self, isbn: &str) -> Result<Option<VolumeInfo>, reqwest::Error> {
        let search: SearchResponse = self
            .get(&self.base_url)
            .query(&[("q", format!("isbn:{}", isbn))])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(first) = search.items.into_iter().next() else {
            tracing::debug!("No volume matches ISBN {}", isbn);
            return Ok(None);
        };

        tracing::debug!("ISBN {} resolved to volume {}", isbn, first.id);

        let detail: VolumeDetail = self
            .get(&format!("{}/{}", self.base_url, first.id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(detail.volume_info)
    }
}

#[async_trait]
impl BookLookup for GoogleBooksClient {
    async fn lookup(&self, isbn: &str) -> Option<VolumeInfo> {
        match self.fetch(isbn).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Bibliographic lookup for ISBN {} failed: {}", isbn, e);
                None
            }
        }
    }
}
