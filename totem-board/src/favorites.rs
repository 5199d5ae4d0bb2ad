//! Saved (line, direction, stop) selections.

use serde::{Deserialize, Serialize};

use crate::domain::Direction;
use crate::selection::Selection;
use crate::storage::{Persisted, StorageError, StorageHost};

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// A saved selection.
///
/// `line` is the totem code rather than a line id, so a favorite survives
/// catalog reloads that renumber lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub line: String,
    pub direction: Direction,
    pub stop: String,
}

impl FavoriteEntry {
    pub fn new(line: impl Into<String>, direction: Direction, stop: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            direction,
            stop: stop.into(),
        }
    }

    /// The favorite for a complete selection.
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        Some(Self::new(
            selection.line_code.clone()?,
            selection.direction,
            selection.stop_id.clone()?,
        ))
    }
}

/// Ordered favorites list, persisted after every change.
///
/// Entries are unique: adding one that is already present does nothing.
#[derive(Debug)]
pub struct FavoritesStore {
    list: Persisted<Vec<FavoriteEntry>>,
}

impl FavoritesStore {
    /// Load the list from `host`, empty when nothing is stored.
    pub fn load(host: Option<StorageHost>) -> Self {
        Self {
            list: Persisted::bind(host, FAVORITES_KEY, Some(Vec::new())),
        }
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        self.list.get().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// First entry equal to (`line`, `direction`, `stop`).
    pub fn lookup(&self, line: &str, direction: Direction, stop: &str) -> Option<&FavoriteEntry> {
        self.entries()
            .iter()
            .find(|f| f.line == line && f.direction == direction && f.stop == stop)
    }

    pub fn contains(&self, entry: &FavoriteEntry) -> bool {
        self.lookup(&entry.line, entry.direction, &entry.stop).is_some()
    }

    /// Append `entry` unless it is already saved.
    ///
    /// Returns whether the list changed.
    pub fn add(&mut self, entry: FavoriteEntry) -> Result<bool, StorageError> {
        if self.contains(&entry) {
            return Ok(false);
        }
        let mut next = self.entries().to_vec();
        next.push(entry);
        self.list.set(next)?;
        Ok(true)
    }

    /// Remove the first entry equal to `entry`.
    ///
    /// Returns whether the list changed.
    pub fn remove(&mut self, entry: &FavoriteEntry) -> Result<bool, StorageError> {
        let Some(index) = self.entries().iter().position(|f| f == entry) else {
            return Ok(false);
        };
        let mut next = self.entries().to_vec();
        next.remove(index);
        self.list.set(next)?;
        Ok(true)
    }

    /// Remove `entry` if saved, add it otherwise.
    ///
    /// Returns whether `entry` is a favorite afterwards.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> Result<bool, StorageError> {
        if self.contains(&entry) {
            self.remove(&entry)?;
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }
}
