//! Plain-text rendering of the published schedule state.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use racingline_core::models::{RaceEvent, Session, SessionStatus};
use racingline_core::utils::{
    format_countdown, format_duration_minutes, format_session_time, truncate_string,
};
use racingline_core::CacheState;

/// Width of the name column in session and event lists
const NAME_WIDTH: usize = 40;

/// Number of upcoming events listed
const MAX_UPCOMING_EVENTS: usize = 10;

pub fn render(state: &CacheState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if state.is_empty() {
        out.push_str("No schedule data yet.\n");
        return out;
    }

    let views = &state.views;
    let _ = writeln!(out, "Schedule updated {}", state.age_display(now));

    let _ = writeln!(out, "\nLIVE NOW");
    if views.live_sessions.is_empty() {
        let _ = writeln!(out, "  (nothing on track)");
    }
    for session in &views.live_sessions {
        let _ = writeln!(out, "  {}", session_line(state, session, now));
    }

    let _ = writeln!(out, "\nNEXT 12 HOURS");
    if views.sessions_within_next_twelve_hours.is_empty() {
        let _ = writeln!(out, "  (no sessions)");
    }
    for session in &views.sessions_within_next_twelve_hours {
        let _ = writeln!(out, "  {}", session_line(state, session, now));
    }

    let _ = writeln!(out, "\nEVENTS");
    for event in views.events_in_progress_and_upcoming.iter().take(MAX_UPCOMING_EVENTS) {
        let _ = writeln!(out, "  {}", event_line(state, event, now));
    }
    out
}

fn series_label(state: &CacheState, series_id: Option<&str>) -> String {
    series_id
        .map(|id| {
            state
                .series_by_id(id)
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| id.to_string())
        })
        .unwrap_or_default()
}

fn session_line(state: &CacheState, session: &Session, now: DateTime<Utc>) -> String {
    let status = match session.status(now) {
        SessionStatus::Upcoming => format_countdown(session.race_start_time(), now),
        other => other.to_string(),
    };
    format!(
        "{:<8} {:<width$} {} ({}) {}",
        truncate_string(&series_label(state, session.series_id.as_deref()), 8),
        truncate_string(&session.display_name(), NAME_WIDTH),
        format_session_time(session.race_start_time()),
        format_duration_minutes(session.duration),
        status,
        width = NAME_WIDTH
    )
}

fn event_line(state: &CacheState, event: &RaceEvent, now: DateTime<Utc>) -> String {
    let when = event
        .first_race_time()
        .map(format_session_time)
        .unwrap_or_else(|| "TBD".to_string());
    let marker = if event.in_progress(now).is_in_progress() { "*" } else { " " };
    let location = state
        .circuit_by_name(&event.circuit)
        .map(|c| c.location_display())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| event.circuit.clone());
    let mut line = format!(
        "{}{:<8} {:<width$} {} {}",
        marker,
        truncate_string(&series_label(state, Some(&event.series_id)), 8),
        truncate_string(&event.event_name, NAME_WIDTH),
        when,
        location,
        width = NAME_WIDTH
    );
    if let Some(live) = event.live_session(now) {
        let _ = write!(line, " [live: {}]", live.session_name);
    }
    line
}
