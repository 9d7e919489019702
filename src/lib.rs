//! # Watchman
//!
//! An in-memory attribute store with synchronous events, named operations
//! and undo stacks.
//!
//! ## Core Concepts
//!
//! - **Attributes**: A map of property names to JSON values
//! - **Events**: Subscribers notified synchronously on every change
//! - **Operations**: Named functions that trigger their own event when invoked
//! - **States**: Snapshots of the whole map or single properties, restored LIFO
//!
//! ## Example
//!
//! ```ignore
//! use watchman::{Subscriber, Watchman};
//! use serde_json::json;
//!
//! let mut store = Watchman::new();
//!
//! store.on("change", &Subscriber::new(|_store, event, _args| {
//!     println!("{:?} changed to {:?}", event.prop, event.data);
//! }));
//!
//! store
//!     .set("title", json!("Draft"), &[])
//!     .remember_all(&[])
//!     .set("title", json!("Final"), &[])
//!     .restore_all(&[]);
//!
//! assert_eq!(store.get("title"), Some(&json!("Draft")));
//! ```

pub mod error;
pub mod registry;
pub mod shared;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, WatchmanError};
pub use registry::{Operation, OperationFn, OperationRegistry};
pub use shared::SharedWatchman;
pub use state::StateManager;
pub use store::{Watchman, WatchmanConfig};
pub use subscriptions::{Subscriber, SubscriberFn, SubscriptionManager};
pub use types::*;
