//! Main Watchman struct tying all components together.

use crate::error::{Result, WatchmanError};
use crate::registry::{Operation, OperationRegistry};
use crate::state::StateManager;
use crate::subscriptions::{Subscriber, SubscriptionManager};
use crate::types::{Attributes, Event, Trigger};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct WatchmanConfig {
    /// Max whole-map snapshots kept by `remember_all` (None = unbounded).
    pub snapshot_limit: Option<usize>,

    /// Max remembered values kept per property (None = unbounded).
    pub property_history_limit: Option<usize>,
}

/// The attribute store.
///
/// Provides a unified interface for:
/// - Reading and writing attributes, with a `change` event on every write
/// - Subscribing to and triggering named events
/// - Registering named operations that trigger their own event when invoked
/// - Remembering and restoring the whole map or single properties
///
/// Everything runs synchronously on the caller's thread. Subscribers and
/// operations receive the store itself and may call back into it; such
/// nested calls complete before the outer call resumes.
pub struct Watchman {
    /// Current attributes.
    attributes: Attributes,

    /// Subscribers per event name.
    subscriptions: SubscriptionManager,

    /// Operations per event name.
    operations: OperationRegistry,

    /// Snapshots and property histories.
    state: StateManager,
}

impl Watchman {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_attributes(Attributes::new())
    }

    /// Create a store seeded with `attributes`.
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self::with_config(attributes, WatchmanConfig::default())
    }

    /// Create a store seeded with `attributes` and custom history limits.
    pub fn with_config(attributes: Attributes, config: WatchmanConfig) -> Self {
        Self {
            attributes,
            subscriptions: SubscriptionManager::new(),
            operations: OperationRegistry::new(),
            state: StateManager::with_limits(config.snapshot_limit, config.property_history_limit),
        }
    }

    /// Create a store seeded from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| WatchmanError::Deserialization(e.to_string()))?;

        match value {
            Value::Object(attributes) => Ok(Self::with_attributes(attributes)),
            other => Err(WatchmanError::NotAnObject(value_kind(&other).to_string())),
        }
    }

    /// Serialize the current attributes as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.attributes)?)
    }

    // --- Attribute Operations ---

    /// Current value of `prop`.
    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.attributes.get(prop)
    }

    /// Copy of the whole attribute map.
    pub fn get_all(&self) -> Attributes {
        self.attributes.clone()
    }

    /// Current value of `prop` decoded into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, prop: &str) -> Result<Option<T>> {
        self.attributes
            .get(prop)
            .map(|value| {
                T::deserialize(value).map_err(|e| WatchmanError::Deserialization(e.to_string()))
            })
            .transpose()
    }

    pub fn contains(&self, prop: &str) -> bool {
        self.attributes.contains_key(prop)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Store `value` under `prop` and fire `change` with the value as data.
    pub fn set(
        &mut self,
        prop: impl Into<String>,
        value: impl Into<Value>,
        args: &[Value],
    ) -> &mut Self {
        let prop = prop.into();
        let value = value.into();

        self.attributes.insert(prop.clone(), value.clone());
        self.trigger(Event::change(Some(prop), value), args);

        self
    }

    /// Merge `mapping` into the attributes, overwriting existing keys, and
    /// fire `change` with the mapping as data and no property.
    pub fn set_many(&mut self, mapping: Attributes, args: &[Value]) -> &mut Self {
        for (prop, value) in &mapping {
            self.attributes.insert(prop.clone(), value.clone());
        }

        self.trigger(Event::change(None, Value::Object(mapping)), args);

        self
    }

    /// Serialize `value` and store it under `prop`.
    pub fn set_serialized<T: Serialize + ?Sized>(
        &mut self,
        prop: impl Into<String>,
        value: &T,
        args: &[Value],
    ) -> Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(prop, value, args))
    }

    /// Delete `prop`. The `change` event carries whether it existed.
    pub fn unset(&mut self, prop: &str, args: &[Value]) -> &mut Self {
        let existed = self.attributes.remove(prop).is_some();
        self.trigger(Event::change(Some(prop.to_string()), Value::Bool(existed)), args);

        self
    }

    /// Replace the attributes with an empty map. Fires `change` with `true`.
    pub fn clear(&mut self, args: &[Value]) -> &mut Self {
        self.attributes = Attributes::new();
        self.trigger(Event::change(None, Value::Bool(true)), args);

        self
    }

    // --- Event Operations ---

    /// Append `subscriber` to the listeners of `event`.
    pub fn on(&mut self, event: &str, subscriber: &Subscriber) -> &mut Self {
        self.subscriptions.subscribe(event, subscriber.clone());
        self
    }

    /// Remove `subscriber` (every registration of it) from `event`, or all
    /// subscribers of `event` when `None`.
    ///
    /// Returns `None` when `event` has never been subscribed to.
    pub fn off(&mut self, event: &str, subscriber: Option<&Subscriber>) -> Option<&mut Self> {
        if self.subscriptions.unsubscribe(event, subscriber) {
            Some(self)
        } else {
            None
        }
    }

    /// Deliver an event to its subscribers, in registration order.
    ///
    /// A bare name is wrapped into a record with no property or data. The
    /// subscriber list is captured before delivery starts; subscribers added
    /// or removed by a callback only see later triggers.
    ///
    /// Returns `None` when the event has no subscriber list.
    pub fn trigger(&mut self, event: impl Into<Trigger>, args: &[Value]) -> Option<&mut Self> {
        let trigger = event.into();

        let Some(subscribers) = self.subscriptions.snapshot(trigger.name()) else {
            trace!(event = trigger.name(), "no subscribers");
            return None;
        };

        let event = trigger.into_event();
        debug!(event = %event.kind, subscribers = subscribers.len(), "dispatching event");

        for subscriber in &subscribers {
            subscriber.call(self, &event, args);
        }

        Some(self)
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscriptions.subscriber_count(event)
    }

    // --- Custom Operations ---

    /// Associate `operation` with `event`, replacing any previous one.
    pub fn register(&mut self, event: &str, operation: Operation) -> &mut Self {
        self.operations.register(event, operation);
        self
    }

    /// Run the operation registered under `event`, then trigger `event` with
    /// the same arguments.
    ///
    /// Returns the operation's result, or `None` (without triggering) if
    /// nothing is registered.
    pub fn invoke(&mut self, event: &str, args: &[Value]) -> Option<Value> {
        let operation = self.operations.get(event)?;

        debug!(event, args = args.len(), "invoking operation");
        let result = operation.call(self, args);
        self.trigger(event, args);

        Some(result)
    }

    pub fn has_operation(&self, event: &str) -> bool {
        self.operations.contains(event)
    }

    // --- State Operations ---

    /// Push the current value of `prop` (or its absence) onto its history.
    pub fn remember(&mut self, prop: &str, args: &[Value]) -> &mut Self {
        let value = self.attributes.get(prop).cloned();
        self.state.push_property(prop, value.clone());
        self.trigger(Event::remember(Some(prop.to_string()), value), args);

        self
    }

    /// Push a copy of the whole attribute map onto the snapshot stack.
    pub fn remember_all(&mut self, args: &[Value]) -> &mut Self {
        let snapshot = self.attributes.clone();
        self.state.push_snapshot(snapshot.clone());
        self.trigger(Event::remember(None, Some(Value::Object(snapshot))), args);

        self
    }

    /// Pop the last remembered value of `prop` and write it back if it was
    /// present. A remembered absence or an empty history leaves `prop` as is.
    pub fn restore(&mut self, prop: &str, args: &[Value]) -> &mut Self {
        let value = self.state.pop_property(prop);

        match &value {
            Some(value) => {
                self.attributes.insert(prop.to_string(), value.clone());
            }
            None => debug!(prop, "nothing to restore"),
        }

        self.trigger(Event::restore(Some(prop.to_string()), value), args);

        self
    }

    /// Pop the last snapshot and replace the attributes with it. An empty
    /// stack leaves the attributes as they are.
    pub fn restore_all(&mut self, args: &[Value]) -> &mut Self {
        let data = match self.state.pop_snapshot() {
            Some(snapshot) => {
                let data = Value::Object(snapshot.clone());
                self.attributes = snapshot;
                Some(data)
            }
            None => {
                debug!("snapshot stack is empty, nothing to restore");
                None
            }
        };

        self.trigger(Event::restore(None, data), args);

        self
    }

    /// Copy of the remembered values of `prop`, oldest first.
    pub fn states(&self, prop: &str) -> Vec<Option<Value>> {
        self.state.property_history(prop)
    }

    /// Copies of all remembered snapshots, oldest first.
    pub fn snapshots(&self) -> Vec<Attributes> {
        self.state.snapshots()
    }
}

impl Default for Watchman {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Attributes> for Watchman {
    fn from(attributes: Attributes) -> Self {
        Self::with_attributes(attributes)
    }
}

impl fmt::Debug for Watchman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watchman")
            .field("attributes", &self.attributes)
            .field("snapshot_count", &self.state.snapshot_count())
            .finish_non_exhaustive()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
