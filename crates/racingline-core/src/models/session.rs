use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Where a session sits relative to a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Upcoming,
    Live,
    Complete,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Upcoming => write!(f, "Upcoming"),
            SessionStatus::Live => write!(f, "Live"),
            SessionStatus::Complete => write!(f, "Complete"),
        }
    }
}

/// A single timed track activity (practice, qualifying, race).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "sessionName")]
    pub session_name: String,
    #[serde(rename = "sessionType", default)]
    pub session_type: Option<String>,
    #[serde(rename = "seriesId", default)]
    pub series_id: Option<String>,
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    /// Scheduled start, RFC 3339
    pub date: DateTime<Utc>,
    /// Scheduled length in minutes
    pub duration: u32,
}

impl Session {
    pub fn race_start_time(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.date + Duration::minutes(i64::from(self.duration))
    }

    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time()
    }

    /// Running means started and not yet finished: `start <= now < end`.
    pub fn is_in_progress(&self, now: DateTime<Utc>) -> bool {
        self.date <= now && now < self.end_time()
    }

    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        if self.is_complete(now) {
            SessionStatus::Complete
        } else if self.is_in_progress(now) {
            SessionStatus::Live
        } else {
            SessionStatus::Upcoming
        }
    }

    /// Label for list views: "Event - Session" when the event name is known
    pub fn display_name(&self) -> String {
        match self.event_name.as_deref() {
            Some(event) if !event.is_empty() => format!("{} - {}", event, self.session_name),
            _ => self.session_name.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_session(id: &str, start: DateTime<Utc>, minutes: u32) -> Session {
    Session {
        id: id.to_string(),
        session_name: format!("Session {}", id),
        session_type: None,
        series_id: None,
        event_name: None,
        date: start,
        duration: minutes,
    }
}
