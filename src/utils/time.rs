use chrono::{DateTime, SecondsFormat, Utc};

/// Parse an Eventbrite UTC timestamp such as `2025-03-01T18:00:00Z`.
///
/// Only timestamps carrying an offset are accepted; anything else yields
/// `None` so callers can decide how lenient to be.
pub fn parse_api_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether an event with this end timestamp is already over.
///
/// Missing or unparseable end times count as still running.
pub fn has_ended(end: &str, now: DateTime<Utc>) -> bool {
    match parse_api_timestamp(end) {
        Some(end) => end < now,
        None => false,
    }
}

/// Format a timestamp for the snapshot envelope, e.g. `2025-03-01T18:00:00.123456+00:00`
pub fn format_snapshot_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, false)
}
