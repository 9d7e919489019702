//! Named operations that double as events.

use crate::store::Watchman;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a registered operation.
pub type OperationFn = dyn Fn(&mut Watchman, &[Value]) -> Value + Send + Sync;

/// A shareable operation callback.
#[derive(Clone)]
pub struct Operation(Arc<OperationFn>);

impl Operation {
    pub fn new<F>(operation: F) -> Self
    where
        F: Fn(&mut Watchman, &[Value]) -> Value + Send + Sync + 'static,
    {
        Operation(Arc::new(operation))
    }

    pub(crate) fn call(&self, store: &mut Watchman, args: &[Value]) -> Value {
        (self.0)(store, args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operation({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// At most one operation per event name.
#[derive(Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `operation` under `event`, replacing any previous one.
    pub fn register(&mut self, event: &str, operation: Operation) {
        self.operations.insert(event.to_string(), operation);
    }

    pub fn get(&self, event: &str) -> Option<Operation> {
        self.operations.get(event).cloned()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.operations.contains_key(event)
    }
}
