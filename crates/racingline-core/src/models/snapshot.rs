use serde::{Deserialize, Serialize};

use super::{Circuit, RaceEvent, Series};

/// The full data set from one successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub series: Vec<Series>,
    pub circuits: Vec<Circuit>,
    pub events: Vec<RaceEvent>,
}

impl Snapshot {
    pub fn series_by_id(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id() == id)
    }

    /// Exact, case-sensitive name match
    pub fn circuit_by_name(&self, name: &str) -> Option<&Circuit> {
        self.circuits.iter().find(|c| c.circuit == name)
    }

    pub fn session_count(&self) -> usize {
        self.events.iter().map(|e| e.sessions.len()).sum()
    }
}
