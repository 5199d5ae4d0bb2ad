//! Departure polling.
//!
//! A [`PollHandle`] owns one background task that queries the catalog for
//! one stop: once immediately, then on a fixed interval. Each successful
//! batch replaces the previous one on the handle's watch channel; failed
//! queries are dropped and the previous batch stays visible.
//!
//! Queries are not serialized: a slow query does not hold back the next
//! tick, and results are published in completion order. Cancelling the
//! handle aborts the task together with every query still in flight, and
//! waits for it to stop, so nothing is published after
//! [`PollHandle::cancel`] returns.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::domain::{DepartureState, Direction, Line, Network};

/// Interval between two departure queries for the same stop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// The stop a poller queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTarget {
    pub line: Line,
    pub stop_id: String,
}

impl PollTarget {
    /// Resolve (`code`, `direction`, `stop_id`) against the network.
    pub fn resolve(
        network: &Network,
        code: &str,
        direction: Direction,
        stop_id: &str,
    ) -> Option<Self> {
        let (line, stop) = network.resolve_stop(code, direction, stop_id)?;
        Some(Self {
            line: line.clone(),
            stop_id: stop.id.clone(),
        })
    }
}

/// Handle to a running poller.
///
/// Dropping the handle aborts the task without waiting for it.
pub struct PollHandle {
    target: PollTarget,
    updates: watch::Receiver<DepartureState>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Start polling `target` every `interval`, beginning now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<C: Catalog>(catalog: Arc<C>, target: PollTarget, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(DepartureState::Loading);
        debug!(line_id = %target.line.id, stop_id = %target.stop_id, "starting poller");
        let task = tokio::spawn(run(catalog, target.clone(), interval, tx));

        Self {
            target,
            updates: rx,
            task: Some(task),
        }
    }

    /// Latest published state.
    pub fn current(&self) -> DepartureState {
        self.updates.borrow().clone()
    }

    /// A receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<DepartureState> {
        self.updates.clone()
    }

    /// Stop the poller and wait until it has stopped.
    pub async fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Resolves once the task has been dropped, in-flight queries
            // included. The error is the expected cancellation.
            let _ = task.await;
            debug!(
                line_id = %self.target.line.id,
                stop_id = %self.target.stop_id,
                "poller stopped"
            );
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

async fn run<C: Catalog>(
    catalog: Arc<C>,
    target: PollTarget,
    interval: Duration,
    tx: watch::Sender<DepartureState>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = FuturesUnordered::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let catalog = catalog.clone();
                let target = target.clone();
                trace!(line_id = %target.line.id, stop_id = %target.stop_id, "querying departures");
                in_flight.push(async move {
                    catalog.departures(&target.line, &target.stop_id).await
                });
            }
            Some(result) = in_flight.next(), if !in_flight.is_empty() => {
                match result {
                    Ok(departures) => {
                        if tx.send(DepartureState::Loaded(Arc::new(departures))).is_err() {
                            // Every receiver is gone
                            return;
                        }
                    }
                    Err(e) => {
                        debug!(
                            line_id = %target.line.id,
                            stop_id = %target.stop_id,
                            error = %e,
                            "departure query failed"
                        );
                    }
                }
            }
        }
    }
}
