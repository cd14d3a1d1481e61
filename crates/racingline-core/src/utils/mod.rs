//! Formatting helpers for schedule display.

pub mod format;

pub use format::{format_countdown, format_duration_minutes, format_session_time, truncate_string};
