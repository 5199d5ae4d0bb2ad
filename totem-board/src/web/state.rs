//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::board::Board;

/// Shared application state.
///
/// One board session behind a mutex: every action is applied in order,
/// as on a single page.
pub struct AppState<C> {
    pub board: Arc<Mutex<Board<C>>>,

    /// Page auto-refresh interval
    pub refresh: Duration,
}

impl<C> AppState<C> {
    pub fn new(board: Board<C>, refresh: Duration) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            refresh,
        }
    }
}

// Not derived: `C` itself need not be `Clone`
impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            refresh: self.refresh,
        }
    }
}
