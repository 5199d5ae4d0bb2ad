//! Mock catalog for running without network access.
//!
//! Loads a network description, plus optional canned departures, from a
//! JSON file and serves them as if they came from the live API.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{Departure, Line, Network};

use super::Catalog;
use super::convert::{convert_departures, convert_network};
use super::error::CatalogError;
use super::types::{DepartureDto, NetworkDto};

/// File layout: the `/reseau` response plus a `passages` map keyed by
/// `"<line id>/<stop id>"`.
#[derive(Debug, Deserialize)]
struct MockData {
    #[serde(flatten)]
    network: NetworkDto,

    #[serde(default)]
    passages: HashMap<String, Vec<DepartureDto>>,
}

/// Mock catalog serving static data.
#[derive(Clone)]
pub struct MockCatalog {
    network: Network,
    departures: Arc<RwLock<HashMap<(String, String), Vec<Departure>>>>,
}

impl MockCatalog {
    /// Load mock data from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Data(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Parse mock data from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: MockData = serde_json::from_str(json)
            .map_err(|e| CatalogError::Data(format!("invalid mock data: {e}")))?;

        let mut departures = HashMap::new();
        for (key, dtos) in data.passages {
            let Some((line_id, stop_id)) = key.split_once('/') else {
                return Err(CatalogError::Data(format!(
                    "invalid passages key {key:?}, expected \"<line>/<stop>\""
                )));
            };
            departures.insert(
                (line_id.to_string(), stop_id.to_string()),
                convert_departures(dtos),
            );
        }

        Ok(Self {
            network: convert_network(data.network),
            departures: Arc::new(RwLock::new(departures)),
        })
    }

    /// Replace the departures served for one stop.
    pub async fn set_departures(&self, line_id: &str, stop_id: &str, departures: Vec<Departure>) {
        let mut guard = self.departures.write().await;
        guard.insert((line_id.to_string(), stop_id.to_string()), departures);
    }
}

impl Catalog for MockCatalog {
    async fn load_network(&self) -> Result<Network, CatalogError> {
        Ok(self.network.clone())
    }

    async fn departures(&self, line: &Line, stop_id: &str) -> Result<Vec<Departure>, CatalogError> {
        if line.get_stop(stop_id).is_none() {
            return Err(CatalogError::NotFound(format!(
                "stop {stop_id} on line {}",
                line.id
            )));
        }

        let guard = self.departures.read().await;
        Ok(guard
            .get(&(line.id.clone(), stop_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    const MOCK_JSON: &str = r#"{
        "lignes": [
            {
                "id": "10A", "codetotem": "10", "senstotem": "A",
                "nom_commercial": "Liane 10", "direction": "Chevigny",
                "arrets": [{"id": "s1", "nom": "Gare"}, {"id": "s2", "nom": "Mairie"}]
            },
            {
                "id": "10R", "codetotem": "10", "senstotem": "R",
                "nom_commercial": "Liane 10", "direction": "Gare",
                "arrets": [{"id": "s3", "nom": "Mairie"}]
            }
        ],
        "passages": {
            "10A/s1": [{"text": "3 min", "date": "2026-10-17T08:03:00+02:00"}]
        }
    }"#;

    #[tokio::test]
    async fn serves_network() {
        let catalog = MockCatalog::from_json(MOCK_JSON).unwrap();
        let network = catalog.load_network().await.unwrap();

        assert_eq!(network.lines().len(), 2);
        assert!(network.resolve("10", Direction::Return).is_some());
    }

    #[tokio::test]
    async fn serves_canned_departures() {
        let catalog = MockCatalog::from_json(MOCK_JSON).unwrap();
        let network = catalog.load_network().await.unwrap();
        let line = network.get_line("10A").unwrap();

        let departures = catalog.departures(line, "s1").await.unwrap();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].text, "3 min");

        // Known stop without canned data has no departures
        assert!(catalog.departures(line, "s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_stop_returns_error() {
        let catalog = MockCatalog::from_json(MOCK_JSON).unwrap();
        let network = catalog.load_network().await.unwrap();
        let line = network.get_line("10A").unwrap();

        let result = catalog.departures(line, "s3").await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn set_departures_replaces_data() {
        let catalog = MockCatalog::from_json(MOCK_JSON).unwrap();
        let network = catalog.load_network().await.unwrap();
        let line = network.get_line("10A").unwrap();

        catalog.set_departures("10A", "s1", Vec::new()).await;
        assert!(catalog.departures(line, "s1").await.unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_passages_key() {
        let json = r#"{"lignes": [], "passages": {"nokey": []}}"#;
        assert!(matches!(
            MockCatalog::from_json(json),
            Err(CatalogError::Data(_))
        ));
    }

    #[test]
    fn missing_file_is_data_error() {
        let result = MockCatalog::from_file("/nonexistent/mock.json");
        assert!(matches!(result, Err(CatalogError::Data(_))));
    }
}
