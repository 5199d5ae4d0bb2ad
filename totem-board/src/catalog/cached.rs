//! Caching layer for departure queries.
//!
//! The main board and any favorite on the same stop poll on independent
//! schedules. A short-lived cache lets them share one upstream request per
//! polling interval instead of each hitting the API.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Departure, Line, Network};

use super::Catalog;
use super::error::CatalogError;

/// Cache key for departures: (line id, stop id).
type DepartureKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached departure lists. Keep below the polling interval.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
            max_capacity: 256,
        }
    }
}

/// Catalog with cached departure queries.
///
/// The network itself is never cached: it is loaded once per session.
pub struct CachedCatalog<C> {
    inner: C,
    departures: MokaCache<DepartureKey, Vec<Departure>>,
}

impl<C: Catalog> CachedCatalog<C> {
    pub fn new(inner: C, config: &CacheConfig) -> Self {
        let departures = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, departures }
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    async fn load_network(&self) -> Result<Network, CatalogError> {
        self.inner.load_network().await
    }

    async fn departures(&self, line: &Line, stop_id: &str) -> Result<Vec<Departure>, CatalogError> {
        let key = (line.id.clone(), stop_id.to_string());

        if let Some(cached) = self.departures.get(&key).await {
            trace!(line_id = %line.id, stop_id, "departures served from cache");
            return Ok(cached);
        }

        // Failures are not cached so the next tick retries upstream
        let fresh = self.inner.departures(line, stop_id).await?;
        self.departures.insert(key, fresh.clone()).await;
        Ok(fresh)
    }
}
