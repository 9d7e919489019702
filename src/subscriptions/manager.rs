//! Subscription manager: event name to ordered subscriber list.

use std::collections::HashMap;

use super::types::Subscriber;

/// Holds the subscribers of every event name.
///
/// A name either has a non-empty list or no entry at all, except after
/// removing the last matching callback by identity, which leaves an empty
/// list behind that still counts as known.
#[derive(Default)]
pub struct SubscriptionManager {
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber to the list for `event`.
    pub fn subscribe(&mut self, event: &str, subscriber: Subscriber) {
        self.subscribers
            .entry(event.to_string())
            .or_default()
            .push(subscriber);
    }

    /// Remove every entry equal to `subscriber`, or the whole list when
    /// `subscriber` is `None`.
    ///
    /// Returns false if `event` was never subscribed to.
    pub fn unsubscribe(&mut self, event: &str, subscriber: Option<&Subscriber>) -> bool {
        let Some(list) = self.subscribers.get_mut(event) else {
            return false;
        };

        match subscriber {
            Some(target) => list.retain(|s| !s.same(target)),
            None => {
                self.subscribers.remove(event);
            }
        }

        true
    }

    /// Snapshot of the subscribers for `event`, in delivery order.
    ///
    /// `None` means the name is unknown. Mutating the manager afterwards does
    /// not affect the returned list.
    pub fn snapshot(&self, event: &str) -> Option<Vec<Subscriber>> {
        self.subscribers.get(event).cloned()
    }

    /// Number of subscribers currently registered for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers.get(event).map_or(0, Vec::len)
    }

    pub fn is_known(&self, event: &str) -> bool {
        self.subscribers.contains_key(event)
    }
}
