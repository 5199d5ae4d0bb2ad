//! Binding of a value to a storage key.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::Storage;
use super::error::StorageError;

/// Shared handle to the durable storage host.
pub type StorageHost = Arc<dyn Storage>;

/// A value mirrored to durable storage under a fixed key.
///
/// The value is read once, when a storage host becomes available, and
/// written back in full on every [`set`](Persisted::set). Until a host is
/// attached the binding is absent and nothing touches storage.
pub struct Persisted<T> {
    key: String,
    default: Option<T>,
    host: Option<StorageHost>,
    value: Option<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Bind `key`, reading its current value from `host` if there is one.
    ///
    /// `default` is used when the stored value is missing, `null` or
    /// unparsable.
    pub fn bind(host: Option<StorageHost>, key: impl Into<String>, default: Option<T>) -> Self {
        let mut binding = Self {
            key: key.into(),
            default,
            host: None,
            value: None,
        };
        if let Some(host) = host {
            binding.attach(host);
        }
        binding
    }

    /// Attach a storage host and load the stored value from it.
    ///
    /// Anything set while detached is replaced by what storage holds.
    pub fn attach(&mut self, host: StorageHost) {
        self.value = load::<T>(host.as_ref(), &self.key).or_else(|| self.default.clone());
        self.host = Some(host);
    }

    /// Current value, `None` while absent.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Replace the value and persist it immediately.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set(&mut self, value: T) -> Result<(), StorageError> {
        let json = serde_json::to_string(&value).map_err(|e| StorageError::Serialize {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        self.value = Some(value);

        match &self.host {
            Some(host) => host.set(&self.key, &json),
            None => Ok(()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("attached", &self.host.is_some())
            .field("value", &self.value)
            .finish()
    }
}

/// Read and decode a stored value, treating every failure as absent.
fn load<T: DeserializeOwned>(host: &dyn Storage, key: &str) -> Option<T> {
    let raw = match host.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn host(storage: &MemoryStorage) -> Option<StorageHost> {
        Some(Arc::new(storage.clone()))
    }

    #[test]
    fn missing_value_uses_default() {
        let storage = MemoryStorage::new();
        let binding = Persisted::bind(host(&storage), "count", Some(7u32));
        assert_eq!(binding.get(), Some(&7));
        // Binding alone does not write
        assert!(storage.is_empty());
    }

    #[test]
    fn missing_value_without_default_is_absent() {
        let storage = MemoryStorage::new();
        let binding: Persisted<u32> = Persisted::bind(host(&storage), "count", None);
        assert_eq!(binding.get(), None);
    }

    #[test]
    fn stored_value_wins_over_default() {
        let storage = MemoryStorage::new();
        storage.set("count", "3").unwrap();
        let binding = Persisted::bind(host(&storage), "count", Some(7u32));
        assert_eq!(binding.get(), Some(&3));
    }

    #[test]
    fn stored_null_uses_default() {
        let storage = MemoryStorage::new();
        storage.set("count", "null").unwrap();
        let binding = Persisted::bind(host(&storage), "count", Some(7u32));
        assert_eq!(binding.get(), Some(&7));
    }

    #[test]
    fn malformed_value_falls_back() {
        let storage = MemoryStorage::new();
        storage.set("count", "{not json").unwrap();
        let binding = Persisted::bind(host(&storage), "count", Some(7u32));
        assert_eq!(binding.get(), Some(&7));

        storage.set("count", "\"wrong type\"").unwrap();
        let binding: Persisted<u32> = Persisted::bind(host(&storage), "count", None);
        assert_eq!(binding.get(), None);
    }

    #[test]
    fn set_persists_immediately() {
        let storage = MemoryStorage::new();
        let mut binding = Persisted::bind(host(&storage), "names", Some(Vec::<String>::new()));

        binding.set(vec!["a".to_string()]).unwrap();
        assert_eq!(storage.get("names").unwrap().as_deref(), Some("[\"a\"]"));

        binding.set(vec!["b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(storage.get("names").unwrap().as_deref(), Some("[\"b\",\"c\"]"));

        let reloaded: Persisted<Vec<String>> = Persisted::bind(host(&storage), "names", None);
        assert_eq!(reloaded.get().map(Vec::len), Some(2));
    }

    #[test]
    fn detached_binding_never_touches_storage() {
        let storage = MemoryStorage::new();
        storage.set("count", "3").unwrap();

        let mut binding = Persisted::bind(None, "count", Some(7u32));
        assert_eq!(binding.get(), None);

        binding.set(9).unwrap();
        assert_eq!(binding.get(), Some(&9));
        assert_eq!(storage.get("count").unwrap().as_deref(), Some("3"));

        binding.attach(Arc::new(storage.clone()));
        assert_eq!(binding.get(), Some(&3));

        binding.set(4).unwrap();
        assert_eq!(storage.get("count").unwrap().as_deref(), Some("4"));
    }
}
