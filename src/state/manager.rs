//! Snapshot stack and property histories.

use crate::types::Attributes;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Owns the remembered states of one store.
#[derive(Clone, Debug, Default)]
pub struct StateManager {
    /// Whole-map snapshots, oldest first.
    snapshots: Vec<Attributes>,
    /// Remembered values per property, oldest first. `None` records that the
    /// property was unset when remembered.
    properties: HashMap<String, Vec<Option<Value>>>,
    /// Max retained snapshots (None = unbounded).
    snapshot_limit: Option<usize>,
    /// Max retained values per property (None = unbounded).
    property_history_limit: Option<usize>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(
        snapshot_limit: Option<usize>,
        property_history_limit: Option<usize>,
    ) -> Self {
        Self {
            snapshot_limit,
            property_history_limit,
            ..Default::default()
        }
    }

    /// Push a snapshot of the whole map.
    pub fn push_snapshot(&mut self, snapshot: Attributes) {
        self.snapshots.push(snapshot);

        if let Some(limit) = self.snapshot_limit {
            let excess = self.snapshots.len().saturating_sub(limit);
            if excess > 0 {
                debug!(evicted = excess, limit, "snapshot stack over limit");
                self.snapshots.drain(..excess);
            }
        }
    }

    /// Pop the most recent snapshot.
    pub fn pop_snapshot(&mut self) -> Option<Attributes> {
        self.snapshots.pop()
    }

    /// Push the current value of `prop` (or its absence) onto its history.
    pub fn push_property(&mut self, prop: &str, value: Option<Value>) {
        let history = self.properties.entry(prop.to_string()).or_default();
        history.push(value);

        if let Some(limit) = self.property_history_limit {
            let excess = history.len().saturating_sub(limit);
            if excess > 0 {
                debug!(prop, evicted = excess, limit, "property history over limit");
                history.drain(..excess);
            }
        }
    }

    /// Pop the most recent remembered value of `prop`.
    ///
    /// An empty or unknown history and a remembered absence both come back
    /// as `None`.
    pub fn pop_property(&mut self, prop: &str) -> Option<Value> {
        self.properties.get_mut(prop).and_then(Vec::pop).flatten()
    }

    /// Copies of all snapshots, oldest first.
    pub fn snapshots(&self) -> Vec<Attributes> {
        self.snapshots.clone()
    }

    /// Copy of the history of `prop`, oldest first. Empty if never remembered.
    pub fn property_history(&self, prop: &str) -> Vec<Option<Value>> {
        self.properties.get(prop).cloned().unwrap_or_default()
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
