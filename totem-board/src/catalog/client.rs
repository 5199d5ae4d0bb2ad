//! Catalog HTTP client.
//!
//! Talks to a JSON front for the network's open data: `GET /reseau` for
//! the line and stop catalog, `GET /totem` for the next departures at one
//! stop of one line.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::{Departure, Line, Network};

use super::Catalog;
use super::convert::{convert_departures, convert_network};
use super::error::CatalogError;
use super::types::{DepartureDto, NetworkDto};

/// Default base URL: a catalog proxy on the local machine.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8081";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP catalog client.
///
/// Every board and every favorite polls through the same client, so a
/// semaphore bounds how many requests are in flight at once.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch the whole network: every line in both directions with stops.
    pub async fn fetch_network(&self) -> Result<Network, CatalogError> {
        let url = format!("{}/reseau", self.base_url);
        let dto: NetworkDto = self.get_json(&url, &[]).await?;
        Ok(convert_network(dto))
    }

    /// Fetch the next departures at a stop of a line.
    pub async fn fetch_departures(
        &self,
        line_id: &str,
        stop_id: &str,
    ) -> Result<Vec<Departure>, CatalogError> {
        let url = format!("{}/totem", self.base_url);
        let dtos: Vec<DepartureDto> = self
            .get_json(&url, &[("ligne", line_id), ("arret", stop_id)])
            .await?;
        Ok(convert_departures(dtos))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| CatalogError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        trace!(url, ?query, "catalog request");
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl Catalog for CatalogClient {
    async fn load_network(&self) -> Result<Network, CatalogError> {
        self.fetch_network().await
    }

    async fn departures(&self, line: &Line, stop_id: &str) -> Result<Vec<Departure>, CatalogError> {
        self.fetch_departures(&line.id, stop_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = CatalogConfig::new()
            .with_base_url("http://localhost:9000/")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = CatalogConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn client_creation() {
        let client = CatalogClient::new(CatalogConfig::new());
        assert!(client.is_ok());
    }
}
