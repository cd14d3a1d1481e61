use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use crate::models::{Circuit, Series, Snapshot};
use crate::views::DerivedViews;

/// One published generation: a snapshot and the views derived from it.
#[derive(Debug, Clone, Default)]
pub struct CacheState {
    pub snapshot: Snapshot,
    pub views: DerivedViews,
    /// When this generation was published; `None` before the first refresh
    pub updated_at: Option<DateTime<Utc>>,
}

impl CacheState {
    pub fn is_empty(&self) -> bool {
        self.updated_at.is_none()
    }

    pub fn series_by_id(&self, id: &str) -> Option<&Series> {
        self.snapshot.series_by_id(id)
    }

    pub fn circuit_by_name(&self, name: &str) -> Option<&Circuit> {
        self.snapshot.circuit_by_name(name)
    }

    pub fn timeline_height(&self) -> usize {
        self.views.timeline_height()
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.updated_at.map(|at| (now - at).num_minutes())
    }

    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        let minutes = match self.age_minutes(now) {
            Some(m) => m,
            None => return "never".to_string(),
        };
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// Holds the latest published `CacheState`.
///
/// The state lives behind a single `Arc` in a watch channel, so a reader
/// always gets a snapshot together with the views derived from it.
pub struct StateStore {
    tx: watch::Sender<Arc<CacheState>>,
}

impl StateStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(CacheState::default()));
        Self { tx }
    }

    /// Publish a new generation, replacing the previous one wholesale.
    pub fn replace(&self, snapshot: Snapshot, views: DerivedViews) {
        let state = CacheState {
            updated_at: Some(views.derived_at),
            snapshot,
            views,
        };
        info!(
            events = state.views.events.len(),
            sessions = state.views.sessions.len(),
            live = state.views.live_sessions.len(),
            next_twelve_hours = state.views.sessions_within_next_twelve_hours.len(),
            "Published schedule data"
        );
        self.tx.send_replace(Arc::new(state));
    }

    pub fn get(&self) -> Arc<CacheState> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver that is notified on every publish
    pub fn subscribe(&self) -> watch::Receiver<Arc<CacheState>> {
        self.tx.subscribe()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
