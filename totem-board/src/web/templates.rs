//! Askama templates for the web frontend.

use askama::Template;

use crate::board::{BoardView, CatalogStatus, DeparturesView, FavoriteView};

/// Shown when the favorites list is empty.
pub const NO_FAVORITES: &str = "Aucun favori pour le moment.";

/// Shown while a query for the selected stop is pending.
pub const LOADING: &str = "Chargement...";

// ============================================================================
// Page Templates
// ============================================================================

/// The board page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub refresh_secs: u64,
    pub catalog: CatalogRow,
    pub lines: Vec<OptionRow>,
    pub directions: Vec<OptionRow>,
    pub stops: Vec<OptionRow>,
    pub has_stop: bool,
    pub is_favorite: bool,
    pub departures: DeparturesRow,
    pub favorites: Vec<FavoriteRow>,
}

impl IndexTemplate {
    /// Flatten a board snapshot into what the page renders.
    pub fn from_view(view: &BoardView, refresh_secs: u64) -> Self {
        let selected_line = view.selection.line_code.as_deref();
        let selected_stop = view.selection.stop_id.as_deref();

        Self {
            refresh_secs,
            catalog: CatalogRow::from_status(&view.catalog),
            lines: view
                .lines
                .iter()
                .map(|l| OptionRow {
                    value: l.code.clone(),
                    label: l.label.clone(),
                    picto: l.picto.clone(),
                    selected: selected_line == Some(l.code.as_str()),
                })
                .collect(),
            directions: view
                .directions
                .iter()
                .map(|d| OptionRow {
                    value: d.direction.code().to_string(),
                    label: d.label.clone(),
                    picto: None,
                    selected: d.direction == view.selection.direction,
                })
                .collect(),
            stops: view
                .stops
                .iter()
                .map(|s| OptionRow {
                    value: s.id.clone(),
                    label: s.name.clone(),
                    picto: None,
                    selected: selected_stop == Some(s.id.as_str()),
                })
                .collect(),
            has_stop: selected_stop.is_some(),
            is_favorite: view.is_favorite,
            departures: DeparturesRow::from_view(&view.departures),
            favorites: view.favorites.iter().map(FavoriteRow::from_view).collect(),
        }
    }

    pub fn no_favorites(&self) -> &'static str {
        NO_FAVORITES
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Catalog state banner.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub ready: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl CatalogRow {
    fn from_status(status: &CatalogStatus) -> Self {
        match status {
            CatalogStatus::Loading => Self {
                ready: false,
                loading: true,
                error: None,
            },
            CatalogStatus::Ready => Self {
                ready: true,
                loading: false,
                error: None,
            },
            CatalogStatus::Failed { message } => Self {
                ready: false,
                loading: false,
                error: Some(message.clone()),
            },
        }
    }
}

/// An entry of a select list.
#[derive(Debug, Clone)]
pub struct OptionRow {
    pub value: String,
    pub label: String,
    pub picto: Option<String>,
    pub selected: bool,
}

/// Departure list for one stop.
#[derive(Debug, Clone, Default)]
pub struct DeparturesRow {
    /// Text above the list: loading notice or heading
    pub status: Option<String>,
    pub items: Vec<DepartureRow>,
}

impl DeparturesRow {
    fn from_view(view: &DeparturesView) -> Self {
        let status = if view.loading {
            Some(LOADING.to_string())
        } else {
            view.heading.clone()
        };
        Self {
            status,
            items: view
                .items
                .iter()
                .map(|d| DepartureRow {
                    text: d.text.clone(),
                    clock: d.at.format("%H:%M").to_string(),
                })
                .collect(),
        }
    }
}

/// One departure line.
#[derive(Debug, Clone)]
pub struct DepartureRow {
    pub text: String,
    /// Local time at the stop, "HH:MM"
    pub clock: String,
}

/// A favorite card.
#[derive(Debug, Clone)]
pub struct FavoriteRow {
    pub line: String,
    pub direction: String,
    pub stop: String,
    pub available: bool,
    pub line_name: String,
    pub picto: Option<String>,
    pub direction_label: String,
    pub stop_name: String,
    pub departures: DeparturesRow,
}

impl FavoriteRow {
    fn from_view(view: &FavoriteView) -> Self {
        Self {
            line: view.entry.line.clone(),
            direction: view.entry.direction.code().to_string(),
            stop: view.entry.stop.clone(),
            available: view.available,
            line_name: view.line_name.clone(),
            picto: view.picto.clone(),
            direction_label: view.direction_label.clone(),
            stop_name: view.stop_name.clone(),
            departures: DeparturesRow::from_view(&view.departures),
        }
    }
}
