use serde::{Deserialize, Serialize};

/// Organization entry from `users/me/organizations/`
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Organization {
    /// Display name for log lines
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationsResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsResponse {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

/// Multipart text field, e.g. `{"text": "...", "html": "..."}`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TextField {
    #[serde(default)]
    pub text: Option<String>,
}

/// Start or end of an event
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventTime {
    #[serde(default)]
    pub utc: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Expanded `venue` sub-resource
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Venue {
    /// Nothing usable came back, e.g. `"venue": {}`
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Logo {
    #[serde(default)]
    pub url: Option<String>,
}

/// Expanded `ticket_availability` sub-resource
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TicketAvailability {
    #[serde(default)]
    pub is_sold_out: Option<bool>,
    #[serde(default)]
    pub has_available_tickets: Option<bool>,
}

/// One event as returned by `organizations/{id}/events/`.
///
/// Every field is optional; the API routinely sends `null` for
/// sub-resources it has nothing for.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<TextField>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<TextField>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub online_event: Option<bool>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub logo: Option<Logo>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub ticket_availability: Option<TicketAvailability>,
}

impl RawEvent {
    pub fn start_utc(&self) -> &str {
        self.start
            .as_ref()
            .and_then(|t| t.utc.as_deref())
            .unwrap_or("")
    }

    pub fn end_utc(&self) -> &str {
        self.end.as_ref().and_then(|t| t.utc.as_deref()).unwrap_or("")
    }

    pub fn name_text(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.text.as_deref())
            .unwrap_or("")
    }

    pub fn description_text(&self) -> &str {
        self.description
            .as_ref()
            .and_then(|d| d.text.as_deref())
            .unwrap_or("")
    }

    pub fn is_online(&self) -> bool {
        self.online_event.unwrap_or(false)
    }
}

/// Normalized event as written to the snapshot file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub url: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub is_online: bool,
    pub logo_url: String,
    pub capacity: Option<i64>,
    pub is_free: bool,
    pub is_sold_out: bool,
    pub has_available_tickets: bool,
}

/// Envelope written to the output file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub updated_at: String,
    pub organizer_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}
