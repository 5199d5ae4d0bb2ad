//! Read-only snapshots of the board for rendering.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::{DepartureHeading, DepartureState};
use crate::favorites::FavoriteEntry;
use crate::selection::{DirectionOption, LineOption, Selection, StopOption};

/// Catalog availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed { message: String },
}

/// One departure, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureItem {
    pub text: String,
    pub at: DateTime<FixedOffset>,
}

/// Departures for one stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeparturesView {
    /// A stop is selected but nothing has arrived yet
    pub loading: bool,

    /// Heading for the list, `None` unless a batch is shown
    pub heading: Option<String>,

    pub items: Vec<DepartureItem>,
}

impl DeparturesView {
    pub fn from_state(state: &DepartureState) -> Self {
        let Some(batch) = state.batch() else {
            return Self {
                loading: state.is_loading(),
                ..Self::default()
            };
        };
        Self {
            loading: false,
            heading: Some(DepartureHeading::for_count(batch.len()).label().to_string()),
            items: batch
                .iter()
                .map(|d| DepartureItem {
                    text: d.text.clone(),
                    at: d.at,
                })
                .collect(),
        }
    }
}

/// A favorite with what it currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteView {
    pub entry: FavoriteEntry,

    /// False when the catalog no longer has this line, direction or stop
    pub available: bool,

    pub line_name: String,
    pub picto: Option<String>,
    pub direction_label: String,
    pub stop_name: String,
    pub departures: DeparturesView,
}

/// Everything the page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub catalog: CatalogStatus,
    pub lines: Vec<LineOption>,
    pub directions: Vec<DirectionOption>,
    pub stops: Vec<StopOption>,
    pub selection: Selection,
    pub departures: DeparturesView,
    pub is_favorite: bool,
    pub favorites: Vec<FavoriteView>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Departure;

    fn departure(text: &str) -> Departure {
        Departure {
            text: text.to_string(),
            at: DateTime::parse_from_rfc3339("2026-10-17T18:30:00+02:00").unwrap(),
        }
    }

    #[test]
    fn idle_view_is_empty() {
        let view = DeparturesView::from_state(&DepartureState::Idle);
        assert!(!view.loading);
        assert!(view.heading.is_none());
        assert!(view.items.is_empty());
    }

    #[test]
    fn loading_view() {
        let view = DeparturesView::from_state(&DepartureState::Loading);
        assert!(view.loading);
        assert!(view.heading.is_none());
    }

    #[test]
    fn loaded_view_headings() {
        let empty = DeparturesView::from_state(&DepartureState::Loaded(Arc::new(vec![])));
        assert_eq!(empty.heading.as_deref(), Some("Aucun prochain passage."));

        let loaded = DepartureState::Loaded(Arc::new(vec![departure("2 min")]));
        let one = DeparturesView::from_state(&loaded);
        assert_eq!(one.heading.as_deref(), Some("Prochain passage :"));
        assert_eq!(one.items[0].text, "2 min");

        let two = DeparturesView::from_state(&DepartureState::Loaded(Arc::new(vec![
            departure("2 min"),
            departure("9 min"),
        ])));
        assert_eq!(two.heading.as_deref(), Some("Prochains passages :"));
        assert_eq!(two.items.len(), 2);
    }

    #[test]
    fn catalog_status_json() {
        let json = serde_json::to_string(&CatalogStatus::Failed {
            message: "timeout".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"failed","message":"timeout"}"#);
        assert_eq!(
            serde_json::to_string(&CatalogStatus::Ready).unwrap(),
            r#"{"status":"ready"}"#
        );
    }
}
