//! Line / direction / stop selection.
//!
//! The three selections depend on each other: a stop id only means
//! something on one line in one direction. [`SelectionEngine`] keeps them
//! consistent as any one of them changes. When the line or direction
//! changes, the selected stop is carried over by name if the new line
//! serves a stop with the same name, and cleared otherwise.
//!
//! All transitions are plain functions of the current state and the
//! loaded [`Network`]; none of them can fail.

use serde::Serialize;

use crate::domain::{DepartureState, Direction, Line, Network, Stop};

/// The user's current choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub line_code: Option<String>,
    pub direction: Direction,
    pub stop_id: Option<String>,
}

impl Selection {
    /// Resolve the selection to its line and stop.
    pub fn resolve<'n>(&self, network: &'n Network) -> Option<(&'n Line, &'n Stop)> {
        let code = self.line_code.as_deref()?;
        let stop_id = self.stop_id.as_deref()?;
        network.resolve_stop(code, self.direction, stop_id)
    }
}

/// An entry of the line list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOption {
    pub code: String,
    pub label: String,
    pub picto: Option<String>,
}

/// An entry of the direction switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionOption {
    pub direction: Direction,
    pub label: String,
}

/// An entry of the stop list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopOption {
    pub id: String,
    pub name: String,
}

/// Selection state plus what is displayed for it.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selection: Selection,
    departures: DepartureState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn departures(&self) -> &DepartureState {
        &self.departures
    }

    /// Reset to the first line of a freshly loaded network, no stop.
    pub fn initialize(&mut self, network: &Network) {
        self.selection.line_code = network.first_code().map(str::to_string);
        self.selection.stop_id = None;
        self.departures = DepartureState::Idle;
    }

    /// Switch line, keeping the stop if the new line has one of that name.
    ///
    /// When the new line does not run in the current direction, the first
    /// direction it does run in is selected instead.
    pub fn set_line(&mut self, network: &Network, code: impl Into<String>) {
        let code = code.into();
        let current = self.selection.direction;
        let direction = if network.resolve(&code, current).is_some() {
            current
        } else {
            Direction::ALL
                .into_iter()
                .find(|d| network.resolve(&code, *d).is_some())
                .unwrap_or(current)
        };

        let carried = self.carry_stop(network, &code, direction);
        self.selection.line_code = Some(code);
        self.selection.direction = direction;
        self.selection.stop_id = carried;
        self.reset_departures(network);
    }

    /// Switch direction, keeping the stop if the other direction has one
    /// of that name.
    pub fn set_direction(&mut self, network: &Network, direction: Direction) {
        let carried = match self.selection.line_code.clone() {
            Some(code) => self.carry_stop(network, &code, direction),
            None => None,
        };
        self.selection.direction = direction;
        self.selection.stop_id = carried;
        self.reset_departures(network);
    }

    /// Select a stop on the current line and direction.
    ///
    /// An id the current line does not serve leaves no stop selected.
    pub fn set_stop(&mut self, network: &Network, stop_id: Option<String>) {
        let line = self
            .selection
            .line_code
            .as_deref()
            .and_then(|code| network.resolve(code, self.selection.direction));

        self.selection.stop_id = match (line, stop_id) {
            (Some(line), Some(id)) if line.get_stop(&id).is_some() => Some(id),
            _ => None,
        };
        self.reset_departures(network);
    }

    /// Show a departure state for the current selection.
    ///
    /// Ignored while no stop is selected, so a late update can never make
    /// an empty selection look loaded.
    pub fn show_departures(&mut self, state: DepartureState) {
        if self.selection.stop_id.is_some() {
            self.departures = state;
        }
    }

    /// The selected line and stop, when the selection is complete.
    pub fn resolved<'n>(&self, network: &'n Network) -> Option<(&'n Line, &'n Stop)> {
        self.selection.resolve(network)
    }

    /// Distinct lines by totem code, in catalog order.
    pub fn line_options(network: &Network) -> Vec<LineOption> {
        network
            .distinct_lines()
            .into_iter()
            .map(|line| LineOption {
                code: line.code.clone(),
                label: line.name.clone(),
                picto: line.picto.clone(),
            })
            .collect()
    }

    /// The directions the catalog actually publishes for `code`, each
    /// labelled with its destination.
    pub fn direction_options(network: &Network, code: &str) -> Vec<DirectionOption> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                network.resolve(code, direction).map(|line| DirectionOption {
                    direction,
                    label: line.direction_label.clone(),
                })
            })
            .collect()
    }

    /// Stops of the selected line and direction, sorted by name.
    pub fn stop_options(&self, network: &Network) -> Vec<StopOption> {
        let Some(code) = self.selection.line_code.as_deref() else {
            return Vec::new();
        };
        let Some(line) = network.resolve(code, self.selection.direction) else {
            return Vec::new();
        };
        line.stops_by_name()
            .into_iter()
            .map(|stop| StopOption {
                id: stop.id.clone(),
                name: stop.name.clone(),
            })
            .collect()
    }

    /// Find the stop on (`code`, `direction`) named like the current one.
    fn carry_stop(&self, network: &Network, code: &str, direction: Direction) -> Option<String> {
        let (_, current) = self.selection.resolve(network)?;
        let target = network.resolve(code, direction)?;
        target
            .find_stop_by_name(&current.name)
            .map(|stop| stop.id.clone())
    }

    fn reset_departures(&mut self, network: &Network) {
        self.departures = if self.resolved(network).is_some() {
            DepartureState::Loading
        } else {
            DepartureState::Idle
        };
    }
}
