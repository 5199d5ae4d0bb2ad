//! Board error types.

use crate::domain::Direction;
use crate::storage::StorageError;

/// Errors from board actions.
///
/// These are rejected inputs, not engine failures: the selection itself
/// never fails, but an action can name a line or direction the catalog
/// does not have, or arrive before the catalog is loaded.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The catalog has not been loaded (yet)
    #[error("catalog not loaded")]
    CatalogNotReady,

    /// No line with this totem code
    #[error("unknown line {0:?}")]
    UnknownLine(String),

    /// The selected line has no such direction
    #[error("line {line:?} has no direction {direction}")]
    UnknownDirection { line: String, direction: Direction },

    /// The catalog no longer serves this favorite
    #[error("favorite {line} {direction} {stop:?} is not in the catalog")]
    UnavailableFavorite {
        line: String,
        direction: Direction,
        stop: String,
    },

    /// The action needs a complete selection
    #[error("no stop selected")]
    NoStopSelected,

    /// Favorites could not be saved
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(BoardError::CatalogNotReady.to_string(), "catalog not loaded");
        assert_eq!(BoardError::UnknownLine("42".into()).to_string(), "unknown line \"42\"");
        assert_eq!(
            BoardError::UnknownDirection {
                line: "T1".into(),
                direction: Direction::Return,
            }
            .to_string(),
            "line \"T1\" has no direction R"
        );
        assert_eq!(BoardError::NoStopSelected.to_string(), "no stop selected");
        assert_eq!(
            BoardError::UnavailableFavorite {
                line: "T1".into(),
                direction: Direction::Outbound,
                stop: "9".into(),
            }
            .to_string(),
            "favorite T1 A \"9\" is not in the catalog"
        );
    }
}
