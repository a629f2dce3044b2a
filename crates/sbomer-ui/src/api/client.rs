//! HTTP client for the SBOMer REST API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::{normalize_page, Page};
use super::error::{ApiError, Result};
use crate::config::DashboardConfig;
use crate::model::{Enhancement, Event, Generation, Manifest, SbomerStats};

/// Default connection timeout for API requests.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default overall request timeout for API requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Zero-based page coordinates as the backend expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }
}

/// Client for the `/api/v1` endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SbomerClient {
    http: Client,
    base_url: Url,
}

impl SbomerClient {
    /// Creates a client with the default timeouts.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client from dashboard configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::with_timeouts(
            &config.api_url,
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_timeouts(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/api/v1/<segments...>`, escaping every segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    fn paged_endpoint(&self, segments: &[&str], page: PageRequest) -> Result<Url> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("pageSize", &page.page_size.to_string())
            .append_pair("pageIndex", &page.page_index.to_string());
        Ok(url)
    }

    async fn get_value(&self, resource: &str, url: Url) -> Result<Value> {
        tracing::debug!("Fetching {} from {}", resource, url);

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                resource: resource.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Fetching {} failed with HTTP {}", resource, status.as_u16());
            return Err(ApiError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| ApiError::Decode {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, url: Url) -> Result<T> {
        let value = self.get_value(resource, url).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get_page<T: DeserializeOwned>(&self, resource: &str, url: Url) -> Result<Page<T>> {
        let value = self.get_value(resource, url).await?;
        let page = normalize_page(value).map_err(|e| ApiError::Decode {
            resource: resource.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Fetched {} {} (total {})", page.data.len(), resource, page.total);
        Ok(page)
    }

    /// Service statistics.
    pub async fn stats(&self) -> Result<SbomerStats> {
        let url = self.endpoint(&["stats"])?;
        self.get_json("stats", url).await
    }

    pub async fn get_generations(&self, page: PageRequest) -> Result<Page<Generation>> {
        let url = self.paged_endpoint(&["generations"], page)?;
        self.get_page("generations", url).await
    }

    pub async fn get_generation(&self, id: &str) -> Result<Generation> {
        let url = self.endpoint(&["generations", id])?;
        self.get_json("generation", url).await
    }

    /// Paths of the log files recorded for a generation.
    pub async fn get_log_paths(&self, id: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["generations", id, "logs"])?;
        self.get_json("generation logs", url).await
    }

    pub async fn get_enhancements(&self, page: PageRequest) -> Result<Page<Enhancement>> {
        let url = self.paged_endpoint(&["enhancements"], page)?;
        self.get_page("enhancements", url).await
    }

    pub async fn get_enhancement(&self, id: &str) -> Result<Enhancement> {
        let url = self.endpoint(&["enhancements", id])?;
        self.get_json("enhancement", url).await
    }

    /// Enhancements that ran on top of one generation.
    pub async fn get_generation_enhancements(&self, id: &str) -> Result<Page<Enhancement>> {
        let url = self.endpoint(&["enhancements", "generation", id])?;
        self.get_page("enhancements", url).await
    }

    /// Lists events, optionally filtered by a backend query expression.
    pub async fn get_events(&self, page: PageRequest, query: &str) -> Result<Page<Event>> {
        let mut url = self.paged_endpoint(&["events"], page)?;
        url.query_pairs_mut().append_pair("query", query);
        self.get_page("events", url).await
    }

    pub async fn get_event(&self, id: &str) -> Result<Event> {
        let url = self.endpoint(&["events", id])?;
        self.get_json("event", url).await
    }

    /// Generations triggered by one event.
    pub async fn get_event_generations(&self, id: &str) -> Result<Page<Generation>> {
        let url = self.endpoint(&["events", id, "generations"])?;
        self.get_page("generations", url).await
    }

    pub async fn get_manifests(&self, page: PageRequest) -> Result<Page<Manifest>> {
        let url = self.paged_endpoint(&["manifests"], page)?;
        self.get_page("manifests", url).await
    }

    pub async fn get_manifest(&self, id: &str) -> Result<Manifest> {
        let url = self.endpoint(&["manifests", id])?;
        self.get_json("manifest", url).await
    }

    /// The SBOM document stored for a manifest, as raw JSON.
    pub async fn get_manifest_json(&self, id: &str) -> Result<Value> {
        let url = self.endpoint(&["manifests", id, "bom"])?;
        self.get_value("manifest", url).await
    }
}
