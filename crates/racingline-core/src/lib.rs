//! Core library for racingline.
//!
//! Downloads the motorsport schedule snapshot (series, circuits, events with
//! their sessions), derives the time-windowed views a schedule viewer shows,
//! and publishes them through a state store the presentation layer reads.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod controller;
pub mod models;
pub mod utils;
pub mod views;

pub use api::{DecodeError, FetchError, RefreshError};
pub use cache::{CacheState, StateStore};
pub use config::Config;
pub use controller::DataController;
pub use views::DerivedViews;
