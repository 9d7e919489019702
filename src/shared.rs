//! Thread-shareable handle around a store.

use crate::store::Watchman;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A store shared across threads behind a single lock.
///
/// The lock covers the attributes, subscribers, operations and both
/// history stacks at once. Callbacks run while the lock is held and get the
/// locked `&mut Watchman`; they must not lock the same handle again.
#[derive(Clone, Debug, Default)]
pub struct SharedWatchman {
    inner: Arc<Mutex<Watchman>>,
}

impl SharedWatchman {
    pub fn new(store: Watchman) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, Watchman> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut Watchman) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Watchman> for SharedWatchman {
    fn from(store: Watchman) -> Self {
        Self::new(store)
    }
}
