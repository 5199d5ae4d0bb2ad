//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::CatalogConfig;
use crate::polling::DEFAULT_POLL_INTERVAL;

/// Default directory for persisted favorites.
const DEFAULT_DATA_DIR: &str = "./data";

/// Default listen address.
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

/// Errors reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidListen { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog API client settings
    pub catalog: CatalogConfig,
    /// Serve this network file instead of calling the API
    pub mock_network: Option<PathBuf>,
    /// Where favorites are stored
    pub data_dir: PathBuf,
    pub listen: SocketAddr,
    pub poll_interval: Duration,
    /// Static assets served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            mock_network: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            poll_interval: DEFAULT_POLL_INTERVAL,
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        }
    }

    /// Read `TOTEM_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset or empty variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(url) = get("TOTEM_API_URL") {
            config.catalog = config.catalog.with_base_url(url);
        }
        if let Some(path) = get("TOTEM_MOCK_NETWORK") {
            config = config.with_mock_network(path);
        }
        if let Some(dir) = get("TOTEM_DATA_DIR") {
            config = config.with_data_dir(dir);
        }
        if let Some(dir) = get("TOTEM_STATIC_DIR") {
            config = config.with_static_dir(dir);
        }

        let listen = get("TOTEM_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        config.listen = listen.trim().parse().map_err(|_| ConfigError::InvalidListen {
            var: "TOTEM_LISTEN",
            value: listen.clone(),
        })?;

        if let Some(secs) = get("TOTEM_POLL_SECS") {
            config.poll_interval = Duration::from_secs(positive("TOTEM_POLL_SECS", &secs)?);
        }
        if let Some(secs) = get("TOTEM_API_TIMEOUT_SECS") {
            config.catalog = config
                .catalog
                .with_timeout(positive("TOTEM_API_TIMEOUT_SECS", &secs)?);
        }
        if let Some(n) = get("TOTEM_API_MAX_CONCURRENT") {
            let n = positive("TOTEM_API_MAX_CONCURRENT", &n)?;
            config.catalog = config.catalog.with_max_concurrent(n as usize);
        }

        Ok(config)
    }

    pub fn with_mock_network(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_network = Some(path.into());
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

fn positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert!(config.mock_network.is_none());
        assert_eq!(config.catalog.base_url, CatalogConfig::default().base_url);
    }

    #[test]
    fn reads_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TOTEM_API_URL", "https://example.org/api/"),
            ("TOTEM_DATA_DIR", "/var/lib/totem"),
            ("TOTEM_LISTEN", "0.0.0.0:8080"),
            ("TOTEM_MOCK_NETWORK", "network.json"),
            ("TOTEM_POLL_SECS", "30"),
            ("TOTEM_API_TIMEOUT_SECS", "5"),
            ("TOTEM_API_MAX_CONCURRENT", "2"),
        ]))
        .unwrap();

        assert_eq!(config.catalog.base_url, "https://example.org/api");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/totem"));
        assert_eq!(config.listen, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.mock_network, Some(PathBuf::from("network.json")));
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.catalog.max_concurrent, 2);
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config =
            AppConfig::from_lookup(lookup(&[("TOTEM_DATA_DIR", ""), ("TOTEM_LISTEN", " ")]))
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.listen, "127.0.0.1:3000".parse().unwrap());
    }

    #[test]
    fn rejects_bad_listen() {
        let err = AppConfig::from_lookup(lookup(&[("TOTEM_LISTEN", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidListen { .. }));
    }

    #[test]
    fn rejects_non_positive_numbers() {
        for value in ["0", "-5", "soon"] {
            let err = AppConfig::from_lookup(lookup(&[("TOTEM_POLL_SECS", value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { .. }), "{value}");
        }
        let err =
            AppConfig::from_lookup(lookup(&[("TOTEM_API_MAX_CONCURRENT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "TOTEM_API_MAX_CONCURRENT", .. }));
    }
}
