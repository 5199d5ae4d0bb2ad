//! The board session: selection, favorites and their pollers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::domain::{DepartureState, Direction, Network};
use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::polling::{PollHandle, PollTarget};
use crate::selection::SelectionEngine;

use super::error::BoardError;
use super::view::{BoardView, CatalogStatus, DeparturesView, FavoriteView};

/// Catalog availability as seen by the board.
#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Ready(Arc<Network>),
    Failed(String),
}

/// One user's departure board.
///
/// Owns the selection, the favorites, and one poller for the selection
/// plus one per favorite. Every action that changes what is polled waits
/// for the replaced poller to stop before starting its successor.
pub struct Board<C> {
    catalog: Arc<C>,
    interval: Duration,
    state: CatalogState,
    engine: SelectionEngine,
    favorites: FavoritesStore,
    main_poller: Option<PollHandle>,
    favorite_pollers: HashMap<FavoriteEntry, PollHandle>,
    /// Bumped by every load; only the latest load may install its result
    generation: u64,
}

/// A catalog load in progress, from [`Board::begin_load`].
pub struct PendingLoad<C> {
    catalog: Arc<C>,
    generation: u64,
}

impl<C: Catalog> PendingLoad<C> {
    /// Fetch the network. Runs without access to the board.
    pub async fn fetch(&self) -> Result<Network, CatalogError> {
        self.catalog.load_network().await
    }
}

impl<C: Catalog> Board<C> {
    /// Create a board; call [`load_catalog`](Self::load_catalog) next.
    pub fn new(catalog: Arc<C>, favorites: FavoritesStore, interval: Duration) -> Self {
        Self {
            catalog,
            interval,
            state: CatalogState::Loading,
            engine: SelectionEngine::new(),
            favorites,
            main_poller: None,
            favorite_pollers: HashMap::new(),
            generation: 0,
        }
    }

    pub fn network(&self) -> Option<&Arc<Network>> {
        match &self.state {
            CatalogState::Ready(network) => Some(network),
            _ => None,
        }
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Load the network and reset the selection to its first line.
    ///
    /// Holds the board for the whole fetch; a shared board should use
    /// [`load_shared`](Self::load_shared) instead.
    pub async fn load_catalog(&mut self) -> Result<(), CatalogError> {
        let pending = self.begin_load().await;
        let result = pending.fetch().await;
        self.finish_load(pending, result).await
    }

    /// Load the network into a shared board without holding its lock
    /// during the fetch, so the board stays readable in the loading state.
    ///
    /// On failure the board enters the failed state and stays usable:
    /// [`retry`](Self::retry) loads again.
    pub async fn load_shared(board: &Mutex<Self>) -> Result<(), CatalogError> {
        let pending = board.lock().await.begin_load().await;
        let result = pending.fetch().await;
        board.lock().await.finish_load(pending, result).await
    }

    /// Reload the catalog of a shared board after a failure.
    pub async fn retry(board: &Mutex<Self>) -> Result<(), CatalogError> {
        Self::load_shared(board).await
    }

    /// Enter the loading state and stop every poller.
    pub async fn begin_load(&mut self) -> PendingLoad<C> {
        self.generation += 1;
        self.state = CatalogState::Loading;
        self.stop_all().await;
        PendingLoad {
            catalog: self.catalog.clone(),
            generation: self.generation,
        }
    }

    /// Install the result of `pending`.
    ///
    /// A result from a load that has since been superseded is dropped and
    /// leaves the board as it is.
    pub async fn finish_load(
        &mut self,
        pending: PendingLoad<C>,
        result: Result<Network, CatalogError>,
    ) -> Result<(), CatalogError> {
        if pending.generation != self.generation {
            debug!(generation = pending.generation, "dropping superseded catalog load");
            return result.map(|_| ());
        }

        match result {
            Ok(network) => {
                info!(lines = network.lines().len(), "catalog loaded");
                let network = Arc::new(network);
                self.engine.initialize(&network);
                self.state = CatalogState::Ready(network);
                self.sync_favorite_pollers().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load catalog");
                self.state = CatalogState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Select a line by totem code.
    pub async fn select_line(&mut self, code: &str) -> Result<(), BoardError> {
        let network = self.ready_network()?;
        if !network.lines().iter().any(|l| l.code == code) {
            return Err(BoardError::UnknownLine(code.to_string()));
        }
        self.engine.set_line(&network, code);
        self.restart_main_poller(&network).await;
        Ok(())
    }

    /// Select a direction of the current line.
    pub async fn select_direction(&mut self, direction: Direction) -> Result<(), BoardError> {
        let network = self.ready_network()?;
        let code = self.engine.selection().line_code.clone().unwrap_or_default();
        if network.resolve(&code, direction).is_none() {
            return Err(BoardError::UnknownDirection {
                line: code,
                direction,
            });
        }
        self.engine.set_direction(&network, direction);
        self.restart_main_poller(&network).await;
        Ok(())
    }

    /// Select a stop of the current line, or none.
    pub async fn select_stop(&mut self, stop_id: Option<String>) -> Result<(), BoardError> {
        let network = self.ready_network()?;
        self.engine.set_stop(&network, stop_id);
        self.restart_main_poller(&network).await;
        Ok(())
    }

    /// Star or unstar the current selection.
    ///
    /// Returns whether it is a favorite afterwards.
    pub async fn toggle_favorite(&mut self) -> Result<bool, BoardError> {
        let entry = FavoriteEntry::from_selection(self.engine.selection())
            .ok_or(BoardError::NoStopSelected)?;
        let starred = self.favorites.toggle(entry)?;
        self.sync_favorite_pollers().await;
        Ok(starred)
    }

    /// Remove a favorite from the favorites panel.
    pub async fn remove_favorite(&mut self, entry: &FavoriteEntry) -> Result<bool, BoardError> {
        let removed = self.favorites.remove(entry)?;
        if removed {
            self.sync_favorite_pollers().await;
        }
        Ok(removed)
    }

    /// Make `entry` the current selection.
    ///
    /// Fails without touching the selection when the catalog no longer
    /// has the favorite's line, direction or stop.
    pub async fn open_favorite(&mut self, entry: &FavoriteEntry) -> Result<(), BoardError> {
        let network = self.ready_network()?;
        if PollTarget::resolve(&network, &entry.line, entry.direction, &entry.stop).is_none() {
            return Err(BoardError::UnavailableFavorite {
                line: entry.line.clone(),
                direction: entry.direction,
                stop: entry.stop.clone(),
            });
        }

        self.engine.set_line(&network, entry.line.as_str());
        self.engine.set_direction(&network, entry.direction);
        self.engine.set_stop(&network, Some(entry.stop.clone()));
        self.restart_main_poller(&network).await;
        Ok(())
    }

    /// Current state of everything on the page.
    pub fn snapshot(&mut self) -> BoardView {
        if let Some(poller) = &self.main_poller {
            self.engine.show_departures(poller.current());
        }

        let selection = self.engine.selection().clone();
        let is_favorite = FavoriteEntry::from_selection(&selection)
            .is_some_and(|entry| self.favorites.contains(&entry));

        let (catalog, lines, directions, stops) = match &self.state {
            CatalogState::Loading => (CatalogStatus::Loading, Vec::new(), Vec::new(), Vec::new()),
            CatalogState::Failed(message) => (
                CatalogStatus::Failed {
                    message: message.clone(),
                },
                Vec::new(),
                Vec::new(),
                Vec::new(),
            ),
            CatalogState::Ready(network) => (
                CatalogStatus::Ready,
                SelectionEngine::line_options(network),
                selection
                    .line_code
                    .as_deref()
                    .map(|code| SelectionEngine::direction_options(network, code))
                    .unwrap_or_default(),
                self.engine.stop_options(network),
            ),
        };

        BoardView {
            catalog,
            lines,
            directions,
            stops,
            departures: DeparturesView::from_state(self.engine.departures()),
            is_favorite,
            favorites: self.favorite_views(),
            selection,
        }
    }

    /// Stop every poller.
    pub async fn shutdown(&mut self) {
        self.stop_all().await;
    }

    fn ready_network(&self) -> Result<Arc<Network>, BoardError> {
        self.network().cloned().ok_or(BoardError::CatalogNotReady)
    }

    async fn restart_main_poller(&mut self, network: &Network) {
        if let Some(poller) = self.main_poller.take() {
            poller.cancel().await;
        }

        let selection = self.engine.selection();
        let target = match (&selection.line_code, &selection.stop_id) {
            (Some(code), Some(stop_id)) => {
                PollTarget::resolve(network, code, selection.direction, stop_id)
            }
            _ => None,
        };

        self.main_poller =
            target.map(|t| PollHandle::start(self.catalog.clone(), t, self.interval));
    }

    /// Start pollers for new favorites and stop those of removed ones.
    async fn sync_favorite_pollers(&mut self) {
        let Some(network) = self.network().cloned() else {
            return;
        };

        let stale: Vec<FavoriteEntry> = self
            .favorite_pollers
            .keys()
            .filter(|entry| !self.favorites.contains(entry))
            .cloned()
            .collect();
        for entry in stale {
            if let Some(poller) = self.favorite_pollers.remove(&entry) {
                poller.cancel().await;
            }
        }

        for entry in self.favorites.entries() {
            if self.favorite_pollers.contains_key(entry) {
                continue;
            }
            match PollTarget::resolve(&network, &entry.line, entry.direction, &entry.stop) {
                Some(target) => {
                    let poller = PollHandle::start(self.catalog.clone(), target, self.interval);
                    self.favorite_pollers.insert(entry.clone(), poller);
                }
                None => {
                    warn!(
                        line = %entry.line,
                        direction = %entry.direction,
                        stop = %entry.stop,
                        "favorite no longer in catalog"
                    );
                }
            }
        }
    }

    async fn stop_all(&mut self) {
        if let Some(poller) = self.main_poller.take() {
            poller.cancel().await;
        }
        for (_, poller) in self.favorite_pollers.drain() {
            poller.cancel().await;
        }
    }

    fn favorite_views(&self) -> Vec<FavoriteView> {
        let Some(network) = self.network() else {
            return Vec::new();
        };

        self.favorites
            .entries()
            .iter()
            .map(|entry| {
                let resolved = network.resolve_stop(&entry.line, entry.direction, &entry.stop);
                let departures = self
                    .favorite_pollers
                    .get(entry)
                    .map(|p| DeparturesView::from_state(&p.current()))
                    .unwrap_or_else(|| DeparturesView::from_state(&DepartureState::Idle));

                match resolved {
                    Some((line, stop)) => FavoriteView {
                        entry: entry.clone(),
                        available: true,
                        line_name: line.name.clone(),
                        picto: line.picto.clone(),
                        direction_label: line.direction_label.clone(),
                        stop_name: stop.name.clone(),
                        departures,
                    },
                    None => FavoriteView {
                        entry: entry.clone(),
                        available: false,
                        line_name: entry.line.clone(),
                        picto: None,
                        direction_label: String::new(),
                        stop_name: entry.stop.clone(),
                        departures,
                    },
                }
            })
            .collect()
    }
}
