use super::models::{EventRecord, RawEvent, Venue};
use crate::utils::time::has_ended;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Filler values left on half-configured events, compared lowercase
pub const PLACEHOLDER_TOKENS: [&str; 5] = ["xxx", "tbd", "tba", "to be determined", "to be announced"];

/// Why an event was left out of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("event could not be decoded: {0}")]
    Malformed(String),

    #[error("event ended at {0}")]
    Ended(String),

    #[error("Skipping event with placeholder name: {0}")]
    PlaceholderName(String),

    #[error("Skipping event '{name}' with placeholder summary: {value}")]
    PlaceholderSummary { name: String, value: String },

    #[error("Skipping event '{name}' with placeholder description: {value}")]
    PlaceholderDescription { name: String, value: String },
}

/// Empty or one of the placeholder tokens, ignoring case
pub fn is_placeholder(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || PLACEHOLDER_TOKENS.contains(&text.to_lowercase().as_str())
}

/// Human readable location for an event
///
/// A venue object without a name or address counts as no venue.
pub fn derive_location(venue: Option<&Venue>, is_online: bool) -> String {
    match venue.filter(|venue| !venue.is_empty()) {
        Some(venue) => {
            let address = venue.address.as_ref();
            let parts: Vec<&str> = [
                address.and_then(|a| a.city.as_deref()),
                address.and_then(|a| a.region.as_deref()),
            ]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

            if parts.is_empty() {
                venue.name.clone().unwrap_or_else(|| "Online".to_string())
            } else {
                parts.join(", ")
            }
        }
        None if is_online => "Online".to_string(),
        None => "TBC".to_string(),
    }
}

/// Turn one raw API event into a record, or say why it is skipped
pub fn normalize_event(raw: &Value, now: DateTime<Utc>) -> Result<EventRecord, SkipReason> {
    let event = RawEvent::deserialize(raw).map_err(|e| SkipReason::Malformed(e.to_string()))?;

    let end = event.end_utc();
    if has_ended(end, now) {
        return Err(SkipReason::Ended(end.to_string()));
    }

    let name = event.name_text().trim().to_string();
    let summary = event.summary.as_deref().unwrap_or("").trim().to_string();
    let description = event.description_text().trim().to_string();

    if is_placeholder(&name) {
        return Err(SkipReason::PlaceholderName(name));
    }
    if is_placeholder(&summary) {
        return Err(SkipReason::PlaceholderSummary {
            name,
            value: summary,
        });
    }
    if is_placeholder(&description) {
        return Err(SkipReason::PlaceholderDescription {
            name,
            value: description,
        });
    }

    let is_online = event.is_online();
    let location = derive_location(event.venue.as_ref(), is_online);

    let tickets = event.ticket_availability.clone().unwrap_or_default();

    Ok(EventRecord {
        id: event.id.clone().unwrap_or_default(),
        name,
        summary,
        description,
        url: event.url.clone().unwrap_or_default(),
        start: event.start_utc().to_string(),
        end: end.to_string(),
        location,
        is_online,
        logo_url: event
            .logo
            .as_ref()
            .and_then(|logo| logo.url.clone())
            .unwrap_or_default(),
        capacity: event.capacity,
        is_free: event.is_free.unwrap_or(false),
        is_sold_out: tickets.is_sold_out.unwrap_or(false),
        has_available_tickets: tickets.has_available_tickets.unwrap_or(true),
    })
}

/// Filter and normalize events, keeping the order the API returned them in
pub fn normalize_events(raw_events: &[Value], now: DateTime<Utc>) -> Vec<EventRecord> {
    let mut records = Vec::with_capacity(raw_events.len());

    for raw in raw_events {
        match normalize_event(raw, now) {
            Ok(record) => records.push(record),
            Err(reason @ SkipReason::Ended(_)) => debug!("Skipping event: {}", reason),
            Err(reason @ SkipReason::Malformed(_)) => warn!("Skipping event: {}", reason),
            Err(reason) => info!("{}", reason),
        }
    }

    records
}
