use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Session;

/// Whether an event is running, with an explicit answer for events that
/// carry no sessions to judge by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventProgress {
    InProgress,
    NotInProgress,
    Unknown,
}

impl EventProgress {
    /// Unknown counts as not running
    pub fn is_in_progress(self) -> bool {
        matches!(self, EventProgress::InProgress)
    }
}

/// A race weekend grouping one or more sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEvent {
    pub id: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "seriesId")]
    pub series_id: String,
    /// Circuit name, matches `Circuit::circuit`
    pub circuit: String,
    pub sessions: Vec<Session>,
}

impl RaceEvent {
    /// Earliest session start; `None` when the event has no sessions.
    pub fn first_race_time(&self) -> Option<DateTime<Utc>> {
        self.sessions.iter().map(Session::race_start_time).min()
    }

    /// All sessions complete. An event without sessions has nothing left to run.
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.sessions.iter().all(|s| s.is_complete(now))
    }

    pub fn in_progress(&self, now: DateTime<Utc>) -> EventProgress {
        if self.sessions.is_empty() {
            return EventProgress::Unknown;
        }
        let running = self.sessions.iter().any(|s| s.is_in_progress(now));
        if running && !self.is_complete(now) {
            EventProgress::InProgress
        } else {
            EventProgress::NotInProgress
        }
    }

    pub fn live_session(&self, now: DateTime<Utc>) -> Option<&Session> {
        self.sessions.iter().find(|s| s.is_in_progress(now))
    }
}

#[cfg(test)]
pub(crate) fn test_event(id: &str, sessions: Vec<Session>) -> RaceEvent {
    RaceEvent {
        id: id.to_string(),
        event_name: format!("Event {}", id),
        series_id: "test-series".to_string(),
        circuit: "Test Circuit".to_string(),
        sessions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::test_session;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_race_time_is_minimum() {
        let event = test_event(
            "e1",
            vec![
                test_session("race", t0() + Duration::days(2), 120),
                test_session("fp1", t0(), 60),
                test_session("quali", t0() + Duration::days(1), 60),
            ],
        );
        assert_eq!(event.first_race_time(), Some(t0()));
    }

    #[test]
    fn test_sessions_list_is_required() {
        let json = r#"{"id":"x","eventName":"X","seriesId":"f1","circuit":"Monza"}"#;
        let err = serde_json::from_str::<RaceEvent>(json).unwrap_err();
        assert!(err.to_string().contains("missing field `sessions`"), "{}", err);

        let json = r#"{"id":"x","eventName":"X","seriesId":"f1","circuit":"Monza","sessions":[]}"#;
        let event: RaceEvent = serde_json::from_str(json).expect("empty list is allowed");
        assert!(event.sessions.is_empty());
    }

    #[test]
    fn test_event_without_sessions() {
        let event = test_event("empty", vec![]);
        assert_eq!(event.first_race_time(), None);
        assert_eq!(event.in_progress(t0()), EventProgress::Unknown);
        assert!(!event.in_progress(t0()).is_in_progress());
        assert!(event.is_complete(t0()));
    }

    #[test]
    fn test_event_in_progress_between_sessions_is_false() {
        let event = test_event(
            "e1",
            vec![
                test_session("fp1", t0() - Duration::hours(3), 60),
                test_session("fp2", t0() + Duration::hours(3), 60),
            ],
        );
        assert_eq!(event.in_progress(t0()), EventProgress::NotInProgress);
        assert!(!event.is_complete(t0()));
    }

    #[test]
    fn test_event_in_progress_during_session() {
        let event = test_event(
            "e1",
            vec![
                test_session("fp1", t0() - Duration::minutes(30), 60),
                test_session("race", t0() + Duration::days(1), 120),
            ],
        );
        assert_eq!(event.in_progress(t0()), EventProgress::InProgress);
        assert_eq!(event.live_session(t0()).map(|s| s.id.as_str()), Some("fp1"));
    }

    #[test]
    fn test_event_complete_after_last_session() {
        let event = test_event("e1", vec![test_session("race", t0() - Duration::hours(3), 120)]);
        assert!(event.is_complete(t0()));
        assert_eq!(event.in_progress(t0()), EventProgress::NotInProgress);
    }
}
