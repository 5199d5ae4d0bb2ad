//! Lines and their stops.

use serde::{Deserialize, Serialize};

use super::Direction;

/// A stop served by one line in one direction.
///
/// Stop identifiers are scoped to their line: the same physical stop has a
/// different id on each line and direction that serves it. Names are what
/// the user recognises, so they are used to carry a selection across lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One direction of a physical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Catalog identifier, unique across the network.
    pub id: String,

    /// Totem code, shared by both directions of the line.
    pub code: String,

    /// Which of the two directions this record describes.
    pub direction: Direction,

    /// Commercial name shown to the user (e.g. "T1", "Corol").
    pub name: String,

    /// Human-readable destination label for this direction.
    pub direction_label: String,

    /// Pictogram URL, when the catalog publishes one.
    pub picto: Option<String>,

    /// Stops in catalog order.
    pub stops: Vec<Stop>,
}

impl Line {
    /// Look up a stop by id.
    pub fn get_stop(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.id == id)
    }

    /// Find the first stop with exactly this name.
    pub fn find_stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.name == name)
    }

    /// Stops sorted by name, ignoring case, for selection lists.
    pub fn stops_by_name(&self) -> Vec<&Stop> {
        let mut stops: Vec<&Stop> = self.stops.iter().collect();
        stops.sort_by_cached_key(|s| s.name.to_lowercase());
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Line {
        Line {
            id: "10A".to_string(),
            code: "10".to_string(),
            direction: Direction::Outbound,
            name: "Liane 10".to_string(),
            direction_label: "Gare".to_string(),
            picto: None,
            stops: vec![
                Stop::new("s1", "mairie"),
                Stop::new("s2", "Gare"),
                Stop::new("s3", "Université"),
            ],
        }
    }

    #[test]
    fn get_stop_by_id() {
        let line = line();
        assert_eq!(line.get_stop("s2").map(|s| s.name.as_str()), Some("Gare"));
        assert!(line.get_stop("nope").is_none());
    }

    #[test]
    fn find_stop_by_exact_name() {
        let line = line();
        assert_eq!(line.find_stop_by_name("Gare").map(|s| s.id.as_str()), Some("s2"));
        // Matching is exact
        assert!(line.find_stop_by_name("gare").is_none());
    }

    #[test]
    fn stops_sorted_case_insensitively() {
        let line = line();
        let names: Vec<&str> = line.stops_by_name().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Gare", "mairie", "Université"]);
    }
}
