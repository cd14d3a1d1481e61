//! Data models for the motorsport schedule.
//!
//! - `Series`: championship/category container
//! - `Circuit`: race venue, looked up by name
//! - `RaceEvent`: race weekend owning its `Session`s
//! - `Snapshot`: everything decoded from one fetch

pub mod circuit;
pub mod event;
pub mod series;
pub mod session;
pub mod snapshot;

pub use circuit::Circuit;
pub use event::{EventProgress, RaceEvent};
pub use series::{Series, SeriesInfo};
pub use session::{Session, SessionStatus};
pub use snapshot::Snapshot;
