//! Remembered states: whole-map snapshots and per-property histories.
//!
//! Both are last-in-first-out stacks. Snapshots are shallow copies of the
//! attribute map taken by `remember_all`; property histories hold the value
//! a property had (or its absence) each time `remember` was called on it.

mod manager;

pub use manager::StateManager;
