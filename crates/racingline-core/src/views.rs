//! Time-windowed projections of a snapshot.
//!
//! Every view is computed against a single `now` so one refresh never mixes
//! windows. The two base sequences are stably sorted; the filtered views keep
//! their base sequence's order.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{RaceEvent, Session, Snapshot};

/// Width of the look-ahead timeline in hours
pub const TIMELINE_WINDOW_HOURS: i64 = 12;

/// Layout height of one row in the look-ahead timeline
pub const TIMELINE_ROW_HEIGHT: usize = 50;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedViews {
    /// The reference time every view below was computed against
    pub derived_at: DateTime<Utc>,
    pub events: Vec<RaceEvent>,
    pub events_in_progress: Vec<RaceEvent>,
    pub events_in_progress_and_upcoming: Vec<RaceEvent>,
    pub sessions: Vec<Session>,
    pub sessions_in_progress_and_upcoming: Vec<Session>,
    pub live_sessions: Vec<Session>,
    pub sessions_within_next_twelve_hours: Vec<Session>,
}

impl DerivedViews {
    pub fn derive(snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        let events = sort_events(&snapshot.events);
        let sessions = flatten_sessions(&events);
        let horizon = now + Duration::hours(TIMELINE_WINDOW_HOURS);

        let events_in_progress = filter_cloned(&events, |e| e.in_progress(now).is_in_progress());
        let events_in_progress_and_upcoming = filter_cloned(&events, |e| !e.is_complete(now));

        let sessions_in_progress_and_upcoming = filter_cloned(&sessions, |s| !s.is_complete(now));
        let live_sessions = filter_cloned(&sessions, |s| s.is_in_progress(now));
        let sessions_within_next_twelve_hours = filter_cloned(&sessions, |s| {
            let start = s.race_start_time();
            start > now && start < horizon
        });

        Self {
            derived_at: now,
            events,
            events_in_progress,
            events_in_progress_and_upcoming,
            sessions,
            sessions_in_progress_and_upcoming,
            live_sessions,
            sessions_within_next_twelve_hours,
        }
    }

    /// Height the presentation layer reserves for the 12 hour timeline
    pub fn timeline_height(&self) -> usize {
        self.sessions_within_next_twelve_hours.len() * TIMELINE_ROW_HEIGHT
    }
}

pub fn derive(snapshot: &Snapshot, now: DateTime<Utc>) -> DerivedViews {
    DerivedViews::derive(snapshot, now)
}

/// Events by first race time, stable; events without sessions go last.
pub fn sort_events(events: &[RaceEvent]) -> Vec<RaceEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| {
        let first = e.first_race_time();
        (first.is_none(), first)
    });
    sorted
}

/// Every session of every event, sorted by start time, stable.
pub fn flatten_sessions(events: &[RaceEvent]) -> Vec<Session> {
    let mut sessions: Vec<Session> = events
        .iter()
        .flat_map(|e| e.sessions.iter().cloned())
        .collect();
    sessions.sort_by_key(Session::race_start_time);
    sessions
}

fn filter_cloned<T: Clone>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| keep(*item)).cloned().collect()
}
