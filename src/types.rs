//! Core types for the attribute store.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// The attribute mapping: property name to value.
pub type Attributes = serde_json::Map<String, Value>;

/// Fired by `set`, `set_many`, `unset` and `clear`.
pub const CHANGE: &str = "change";

/// Fired by `remember` and `remember_all`.
pub const REMEMBER: &str = "remember";

/// Fired by `restore` and `restore_all`.
pub const RESTORE: &str = "restore";

/// The record delivered to subscribers as the first argument.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Name of the event that fired.
    #[serde(rename = "type")]
    pub kind: String,

    /// The affected property, if the event concerns a single one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop: Option<String>,

    /// Payload of the event. A present JSON `null` is `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_data"
    )]
    pub data: Option<Value>,
}

impl Event {
    pub fn new(kind: impl Into<String>, prop: Option<String>, data: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            prop,
            data,
        }
    }

    /// An event carrying only its name.
    pub fn named(kind: impl Into<String>) -> Self {
        Self::new(kind, None, None)
    }

    pub fn change(prop: Option<String>, data: Value) -> Self {
        Self::new(CHANGE, prop, Some(data))
    }

    pub fn remember(prop: Option<String>, data: Option<Value>) -> Self {
        Self::new(REMEMBER, prop, data)
    }

    pub fn restore(prop: Option<String>, data: Option<Value>) -> Self {
        Self::new(RESTORE, prop, data)
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prop, &self.data) {
            (Some(prop), Some(data)) => write!(f, "Event({}, {}, {})", self.kind, prop, data),
            (Some(prop), None) => write!(f, "Event({}, {})", self.kind, prop),
            (None, Some(data)) => write!(f, "Event({}, -, {})", self.kind, data),
            (None, None) => write!(f, "Event({})", self.kind),
        }
    }
}

/// Keeps a present `data` key as `Some`, even when it holds `null`.
fn present_data<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// What `trigger` accepts: a bare event name or a pre-built record.
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    Name(String),
    Record(Event),
}

impl Trigger {
    /// Name used to look up subscribers.
    pub fn name(&self) -> &str {
        match self {
            Trigger::Name(name) => name,
            Trigger::Record(event) => &event.kind,
        }
    }

    /// Normalize into the record handed to subscribers.
    pub fn into_event(self) -> Event {
        match self {
            Trigger::Name(name) => Event::named(name),
            Trigger::Record(event) => event,
        }
    }
}

impl From<&str> for Trigger {
    fn from(name: &str) -> Self {
        Trigger::Name(name.to_string())
    }
}

impl From<String> for Trigger {
    fn from(name: String) -> Self {
        Trigger::Name(name)
    }
}

impl From<Event> for Trigger {
    fn from(event: Event) -> Self {
        Trigger::Record(event)
    }
}
