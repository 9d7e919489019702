//! Event subscriptions for live attribute updates.
//!
//! Subscribers are registered per event name and delivered to
//! synchronously, in registration order, whenever the store triggers that
//! name. Built-in events:
//! - `change` from `set`, `set_many`, `unset` and `clear`
//! - `remember` from `remember` and `remember_all`
//! - `restore` from `restore` and `restore_all`
//!
//! Operation names double as event names: `invoke` triggers subscribers of
//! the same name after running the operation.
//!
//! # Example
//!
//! ```ignore
//! let logger = Subscriber::new(|_store, event, _args| {
//!     println!("{:?}", event);
//! });
//!
//! let mut store = Watchman::new();
//! store.on("change", &logger).set("theme", json!("dark"), &[]);
//! store.off("change", Some(&logger));
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{Subscriber, SubscriberFn};
