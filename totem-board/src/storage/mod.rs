//! Durable key-value storage and the bindings built on it.
//!
//! A [`Storage`] holds serialized strings by key. A [`Persisted`] binds one
//! typed value to one key: it loads once when a host is attached and
//! writes the whole value back on every change, without debouncing.

mod binding;
mod error;
mod file;
mod memory;

pub use binding::{Persisted, StorageHost};
pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Raw key-value access to durable storage.
pub trait Storage: Send + Sync {
    /// Read the raw value at `key`, `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
