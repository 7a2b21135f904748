use super::models::{EventRecord, Snapshot};
use crate::error::SyncResult;
use crate::utils::time::format_snapshot_timestamp;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

impl Snapshot {
    /// Wrap normalized records with the envelope metadata
    pub fn new(organizer_id: &str, events: Vec<EventRecord>, updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at: format_snapshot_timestamp(updated_at),
            organizer_id: organizer_id.to_string(),
            count: events.len(),
            events,
        }
    }
}

/// Overwrite `path` with the pretty-printed snapshot, creating parent directories
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;

    Ok(())
}

/// Read a previously written snapshot
pub fn read_snapshot(path: &Path) -> SyncResult<Snapshot> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// One summary line per event, as printed after a successful write
pub fn summary_line(event: &EventRecord) -> String {
    format!("  - {} ({}) - {}", event.name, event.start, event.location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn record(id: &str, name: &str) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            name: name.to_string(),
            summary: "Summary".to_string(),
            description: "Description".to_string(),
            url: format!("https://www.eventbrite.com/e/{}", id),
            start: "2030-01-01T18:00:00Z".to_string(),
            end: "2030-01-01T20:00:00Z".to_string(),
            location: "Paris".to_string(),
            is_online: false,
            logo_url: String::new(),
            capacity: Some(50),
            is_free: false,
            is_sold_out: false,
            has_available_tickets: true,
        }
    }

    fn updated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_snapshot_count_matches_events() {
        let snapshot = Snapshot::new("org-1", vec![record("1", "A"), record("2", "B")], updated_at());
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.count, snapshot.events.len());
        assert_eq!(snapshot.updated_at, "2025-06-01T12:00:00.000000+00:00");
    }

    #[test]
    fn test_write_creates_directories_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets/data/eventbrite-upcoming.json");
        let snapshot = Snapshot::new("org-1", vec![record("1", "Rencontre à Zürich")], updated_at());

        write_snapshot(&path, &snapshot).unwrap();
        let read_back = read_snapshot(&path).unwrap();

        assert_eq!(read_back, snapshot);
    }

    #[test]
    fn test_write_is_pretty_and_keeps_non_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let snapshot = Snapshot::new("org-1", vec![record("1", "Rencontre à Zürich")], updated_at());

        write_snapshot(&path, &snapshot).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("{\n  \"updated_at\""));
        assert!(content.contains("Rencontre à Zürich"));
        assert!(content.contains("\n      \"capacity\": 50"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale content that is much longer than nothing at all").unwrap();

        let snapshot = Snapshot::new("org-1", Vec::new(), updated_at());
        write_snapshot(&path, &snapshot).unwrap();

        let read_back = read_snapshot(&path).unwrap();
        assert_eq!(read_back.count, 0);
        assert!(read_back.events.is_empty());
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&record("1", "Meetup")),
            "  - Meetup (2030-01-01T18:00:00Z) - Paris"
        );
    }
}
