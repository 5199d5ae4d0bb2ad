//! Departure predictions.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One upcoming departure as announced by the stop's totem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    /// Free text, e.g. "3 min" or "14:52".
    pub text: String,

    /// Predicted departure time.
    pub at: DateTime<FixedOffset>,
}

/// A batch of departures, soonest first. Shared between the poller and views.
pub type DepartureBatch = Arc<Vec<Departure>>;

/// Label shown above a departure batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureHeading {
    None,
    Single,
    Several,
}

impl DepartureHeading {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => DepartureHeading::None,
            1 => DepartureHeading::Single,
            _ => DepartureHeading::Several,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepartureHeading::None => "Aucun prochain passage.",
            DepartureHeading::Single => "Prochain passage :",
            DepartureHeading::Several => "Prochains passages :",
        }
    }
}

/// What is currently displayed for a stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepartureState {
    /// Nothing to show: no stop is selected.
    #[default]
    Idle,

    /// A stop is selected but no query has succeeded yet.
    Loading,

    /// The latest successful batch.
    Loaded(DepartureBatch),
}

impl DepartureState {
    pub fn batch(&self) -> Option<&DepartureBatch> {
        match self {
            DepartureState::Loaded(batch) => Some(batch),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DepartureState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_by_count() {
        assert_eq!(DepartureHeading::for_count(0), DepartureHeading::None);
        assert_eq!(DepartureHeading::for_count(1), DepartureHeading::Single);
        assert_eq!(DepartureHeading::for_count(2), DepartureHeading::Several);
        assert_eq!(DepartureHeading::for_count(12), DepartureHeading::Several);
    }

    #[test]
    fn heading_labels() {
        assert_eq!(DepartureHeading::None.label(), "Aucun prochain passage.");
        assert_eq!(DepartureHeading::Single.label(), "Prochain passage :");
        assert_eq!(DepartureHeading::Several.label(), "Prochains passages :");
    }

    #[test]
    fn state_accessors() {
        assert!(DepartureState::Loading.is_loading());
        assert!(DepartureState::Idle.batch().is_none());

        let at = DateTime::parse_from_rfc3339("2026-10-17T08:15:00+02:00").unwrap();
        let batch = Arc::new(vec![Departure {
            text: "4 min".to_string(),
            at,
        }]);
        let state = DepartureState::Loaded(batch.clone());
        assert!(!state.is_loading());
        assert_eq!(state.batch(), Some(&batch));
    }
}
