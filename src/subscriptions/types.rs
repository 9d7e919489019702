//! Subscriber handles.

use crate::store::Watchman;
use crate::types::Event;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a subscriber callback.
///
/// Receives the store that fired, the event record, then any extra
/// arguments passed by the caller.
pub type SubscriberFn = dyn Fn(&mut Watchman, &Event, &[Value]) + Send + Sync;

/// A shareable subscriber callback.
///
/// Identity is the shared allocation: clones of one handle are the same
/// subscriber, two handles built from identical closures are not.
#[derive(Clone)]
pub struct Subscriber(Arc<SubscriberFn>);

impl Subscriber {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Watchman, &Event, &[Value]) + Send + Sync + 'static,
    {
        Subscriber(Arc::new(callback))
    }

    /// Whether both handles refer to the same callback.
    pub fn same(&self, other: &Subscriber) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(&self, store: &mut Watchman, event: &Event, args: &[Value]) {
        (self.0)(store, event, args)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscriber({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}
