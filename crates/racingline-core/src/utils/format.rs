use chrono::{DateTime, Utc};

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Session start for list views: "Sat Jun 15 14:00"
pub fn format_session_time(time: DateTime<Utc>) -> String {
    time.format("%a %b %d %H:%M").to_string()
}

/// Session length: "45m", "2h", "1h 30m"
pub fn format_duration_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Time until `start`: "in 2h 05m", "in 12m", or "started" once it has begun
pub fn format_countdown(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (start - now).num_minutes();
    if start <= now {
        "started".to_string()
    } else if minutes < 1 {
        "in <1m".to_string()
    } else if minutes < 60 {
        format!("in {}m", minutes)
    } else {
        format!("in {}h {:02}m", minutes / 60, minutes % 60)
    }
}
