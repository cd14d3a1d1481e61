//! In-memory state store for the latest schedule data.
//!
//! `StateStore` publishes whole `CacheState` generations; the presentation
//! layer either polls `get()` or waits on a `subscribe()` receiver. Nothing
//! is persisted; a failed refresh simply never publishes.

pub mod store;

pub use store::{CacheState, StateStore};
