use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::error;

use super::driver::execute;
use super::state::{Action, ListError, ListState, Outcome, Request};
use super::transition::transition;
use crate::remote::{RemoteError, TaskStore};

/// Runs each request on its own thread and hands completions back over a
/// channel. Nothing orders overlapping requests: whichever finishes first is
/// delivered first.
pub struct RequestPool {
    store: Arc<dyn TaskStore>,
    tx: mpsc::Sender<Outcome>,
    rx: mpsc::Receiver<Outcome>,
    in_flight: usize,
}

impl RequestPool {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        RequestPool {
            store,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn submit(&mut self, request: Request) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let fallback = request.clone();
        let on_panic = request.clone();
        self.in_flight += 1;

        let spawned = thread::Builder::new()
            .name(format!("td-{}", request.operation()))
            .spawn(move || {
                // Every submitted request must answer, or in_flight never drains
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    execute(store.as_ref(), request)
                }))
                .unwrap_or_else(|_| {
                    error!(op = %on_panic.operation(), "request thread panicked");
                    Outcome::failure(
                        &on_panic,
                        RemoteError::Transport("request aborted unexpectedly".into()),
                    )
                });
                // The receiver is gone only when the app is shutting down.
                let _ = tx.send(outcome);
            });

        if let Err(e) = spawned {
            error!(error = %e, "could not start request thread");
            let _ = self.tx.send(Outcome::failure(
                &fallback,
                RemoteError::Transport(format!("could not start request: {}", e)),
            ));
        }
    }

    /// Non-blocking poll for finished requests.
    /// Returns all queued outcomes (may be empty).
    pub fn poll(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        self.in_flight -= outcomes.len().min(self.in_flight);
        outcomes
    }

    /// Block until one outcome arrives or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<Outcome> {
        let outcome = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// List state plus a [`RequestPool`]: actions apply immediately, remote
/// completions apply when [`pump`](Self::pump) is called from the owning
/// thread.
pub struct ListController {
    state: ListState,
    pool: RequestPool,
}

impl ListController {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        ListController {
            state: ListState::new(),
            pool: RequestPool::new(store),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Apply an action, sending any resulting request to the pool.
    /// Returns the failure surfaced synchronously (validation errors).
    pub fn dispatch(&mut self, action: Action) -> Option<ListError> {
        let step = transition(&mut self.state, action);
        if let Some(request) = step.request {
            self.pool.submit(request);
        }
        step.error
    }

    /// Apply every completion that has arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let outcomes = self.pool.poll();
        let count = outcomes.len();
        for outcome in outcomes {
            self.dispatch(Action::Completed(outcome));
        }
        count
    }

    pub fn in_flight(&self) -> usize {
        self.pool.in_flight()
    }

    /// Apply completions as they arrive until nothing is in flight.
    /// Returns false if `timeout` ran out first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pool.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(outcome) = self.pool.wait(remaining) {
                self.dispatch(Action::Completed(outcome));
            }
        }
        true
    }
}
