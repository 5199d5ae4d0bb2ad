//! Transit catalog access.
//!
//! The [`Catalog`] trait is the seam between the board and the network's
//! data: the line/stop catalog, and per-stop departure predictions. The
//! board is generic over it so tests and offline runs can substitute
//! [`MockCatalog`] or a hand-written fake.

mod cached;
mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::{Departure, Line, Network};

pub use cached::{CacheConfig, CachedCatalog};
pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;
pub use mock::MockCatalog;
pub use types::{DepartureDto, LineDto, NetworkDto, StopDto};

/// Source of lines, stops and departure predictions.
pub trait Catalog: Send + Sync + 'static {
    /// Load every line of the network, both directions, with their stops.
    fn load_network(&self) -> impl Future<Output = Result<Network, CatalogError>> + Send;

    /// Query the next departures at `stop_id` on `line`, soonest first.
    fn departures(
        &self,
        line: &Line,
        stop_id: &str,
    ) -> impl Future<Output = Result<Vec<Departure>, CatalogError>> + Send;
}
