//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::BoardView;
use crate::domain::{Direction, InvalidDirection};
use crate::favorites::FavoriteEntry;

/// Form: pick a line.
#[derive(Debug, Deserialize)]
pub struct SelectLineForm {
    /// Totem code
    pub line: String,
}

/// Form: pick a direction ("A" or "R").
#[derive(Debug, Deserialize)]
pub struct SelectDirectionForm {
    pub direction: String,
}

impl SelectDirectionForm {
    pub fn direction(&self) -> Result<Direction, InvalidDirection> {
        Direction::parse(&self.direction)
    }
}

/// Form: pick a stop. An empty or missing stop clears the selection.
#[derive(Debug, Deserialize)]
pub struct SelectStopForm {
    #[serde(default)]
    pub stop: Option<String>,
}

impl SelectStopForm {
    pub fn stop_id(self) -> Option<String> {
        self.stop.filter(|s| !s.trim().is_empty())
    }
}

/// Form: a favorite, as posted from the favorites panel.
#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub line: String,
    pub direction: String,
    pub stop: String,
}

impl FavoriteForm {
    pub fn entry(self) -> Result<FavoriteEntry, InvalidDirection> {
        let direction = Direction::parse(&self.direction)?;
        Ok(FavoriteEntry::new(self.line, direction, self.stop))
    }
}

/// `GET /api/board` response.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    #[serde(flatten)]
    pub board: BoardView,

    /// Seconds between two departure queries
    pub poll_interval_secs: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
