//! services/client/src/store/mod.rs
//!
//! The shared store handle. It owns the single `MainState`, applies
//! mutations atomically and tells observers that something changed.

pub mod actions;
pub mod progress;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dnada_core::{MainState, Mutation};
use tokio::sync::watch;
use tracing::trace;

/// A cloneable handle to the store. All clones see the same state.
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<MainState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(MainState::new())
    }

    /// Starts from a pre-built state, e.g. one restored by a host.
    pub fn with_state(state: MainState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(state)),
            revision: Arc::new(revision),
        }
    }

    // A panic inside `apply` cannot leave the state half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, MainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one mutation and bumps the revision.
    pub fn commit(&self, mutation: Mutation) {
        trace!(mutation = mutation.name(), "commit");
        self.lock().apply(mutation);
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Runs `f` against the current state. Do not call `commit` from inside `f`.
    pub fn read<R>(&self, f: impl FnOnce(&MainState) -> R) -> R {
        f(&self.lock())
    }

    pub fn snapshot(&self) -> MainState {
        self.lock().clone()
    }

    /// Number of mutations committed so far.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// A receiver that wakes after every commit.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
