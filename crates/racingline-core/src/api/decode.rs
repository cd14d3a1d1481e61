//! Snapshot decoding.
//!
//! The payload is parsed to a JSON tree first and each collection element is
//! then decoded on its own, so a schema mismatch can be reported with the
//! path of the element that caused it. Decoding is all-or-nothing.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{Circuit, RaceEvent, Session, Snapshot};

use super::DecodeError;

/// Top-level keys of the provider's payload
const SERIES_KEY: &str = "series";
const CIRCUITS_KEY: &str = "circuits";
const EVENTS_KEY: &str = "events";
const SESSIONS_KEY: &str = "sessions";

pub fn decode(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    let root: Value = serde_json::from_slice(bytes).map_err(|e| DecodeError::new("$", e))?;
    let root = root.as_object().ok_or_else(|| {
        DecodeError::new("$", format!("expected an object, found {}", kind(&root)))
    })?;

    let series = decode_list(root, SERIES_KEY, decode_item)?;
    let circuits: Vec<Circuit> = decode_list(root, CIRCUITS_KEY, decode_item)?;
    let events = decode_list(root, EVENTS_KEY, decode_event)?;

    let snapshot = Snapshot {
        series,
        circuits,
        events,
    };
    debug!(
        series = snapshot.series.len(),
        circuits = snapshot.circuits.len(),
        events = snapshot.events.len(),
        sessions = snapshot.session_count(),
        "Snapshot decoded"
    );
    Ok(snapshot)
}

fn decode_list<T>(
    root: &Map<String, Value>,
    key: &str,
    decode_one: impl Fn(&Value, &str) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let value = root
        .get(key)
        .ok_or_else(|| DecodeError::new("$", format!("missing field `{}`", key)))?;
    let items = value
        .as_array()
        .ok_or_else(|| DecodeError::new(key, format!("expected a list, found {}", kind(value))))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode_one(item, &format!("{}[{}]", key, i)))
        .collect()
}

fn decode_item<T: DeserializeOwned>(item: &Value, path: &str) -> Result<T, DecodeError> {
    T::deserialize(item).map_err(|e| DecodeError::new(path, e))
}

fn decode_event(item: &Value, path: &str) -> Result<RaceEvent, DecodeError> {
    // Check sessions one by one first so a bad session is reported by index
    if let Some(sessions) = item.get(SESSIONS_KEY).and_then(Value::as_array) {
        for (i, session) in sessions.iter().enumerate() {
            Session::deserialize(session)
                .map_err(|e| DecodeError::new(format!("{}.{}[{}]", path, SESSIONS_KEY, i), e))?;
        }
    }
    decode_item(item, path)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "series": [{"seriesInfo": {"id": "f1", "name": "Formula 1", "shortName": "F1"}}],
        "circuits": [
            {"circuit": "Silverstone", "city": "Silverstone", "country": "United Kingdom"}
        ],
        "events": [{
            "id": "gb24",
            "eventName": "British Grand Prix",
            "seriesId": "f1",
            "circuit": "Silverstone",
            "sessions": [
                {"id": "fp1", "sessionName": "Practice 1",
                 "date": "2024-07-05T11:30:00Z", "duration": 60},
                {"id": "race", "sessionName": "Race",
                 "date": "2024-07-07T14:00:00Z", "duration": 120}
            ]
        }]
    }"#;

    #[test]
    fn test_decode_valid_snapshot() {
        let snapshot = decode(VALID.as_bytes()).expect("valid payload should decode");
        assert_eq!(snapshot.series.len(), 1);
        assert_eq!(snapshot.circuits[0].circuit, "Silverstone");
        assert_eq!(snapshot.events[0].sessions.len(), 2);
        assert_eq!(snapshot.session_count(), 2);
    }

    #[test]
    fn test_decode_reports_bad_session_path() {
        let payload = VALID.replace(r#""duration": 120"#, r#""duration": "two hours""#);
        let err = decode(payload.as_bytes()).unwrap_err();
        assert_eq!(err.path, "events[0].sessions[1]");
        assert!(err.message.contains("invalid type"), "{}", err.message);
    }

    #[test]
    fn test_decode_reports_missing_field() {
        let payload = VALID.replace(r#""eventName": "British Grand Prix","#, "");
        let err = decode(payload.as_bytes()).unwrap_err();
        assert_eq!(err.path, "events[0]");
        assert!(err.message.contains("eventName"), "{}", err.message);
    }

    #[test]
    fn test_decode_event_without_sessions_key() {
        let payload = br#"{
            "series": [],
            "circuits": [],
            "events": [{"id": "x", "eventName": "X", "seriesId": "f1", "circuit": "Monza"}]
        }"#;

        let err = decode(payload).unwrap_err();
        assert_eq!(err.path, "events[0]");
        assert!(err.message.contains("missing field `sessions`"), "{}", err.message);
    }

    #[test]
    fn test_decode_missing_collection() {
        let err = decode(br#"{"series": [], "circuits": []}"#).unwrap_err();
        assert_eq!(err.path, "$");
        assert!(err.message.contains("events"));
    }

    #[test]
    fn test_decode_collection_wrong_type() {
        let err = decode(br#"{"series": [], "circuits": {}, "events": []}"#).unwrap_err();
        assert_eq!(err.path, "circuits");
        assert_eq!(err.message, "expected a list, found an object");
    }

    #[test]
    fn test_decode_rejects_non_object_root() {
        let err = decode(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.message, "expected an object, found a list");
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = decode(b"{\"series\": [").unwrap_err();
        assert_eq!(err.path, "$");
    }

    #[test]
    fn test_decode_empty_collections() {
        let snapshot = decode(br#"{"series": [], "circuits": [], "events": []}"#)
            .expect("empty collections are valid");
        assert_eq!(snapshot, Snapshot::default());
    }
}
