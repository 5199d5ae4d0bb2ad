//! Storage error types.

/// Errors from durable storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized
    #[error("failed to serialize value for key {key:?}: {message}")]
    Serialize { key: String, message: String },

    /// Key is not usable as a storage name
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StorageError::InvalidKey("../x".into());
        assert_eq!(err.to_string(), "invalid storage key \"../x\"");

        let err = StorageError::Serialize {
            key: "favorites".into(),
            message: "boom".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to serialize value for key \"favorites\": boom"
        );
    }
}
