mod client;
pub mod filter;
pub mod models;
mod writer;

pub use client::{EventbriteClient, EVENT_QUERY};
pub use filter::{normalize_event, normalize_events, SkipReason};
pub use models::{EventRecord, Organization, Snapshot};
pub use writer::{read_snapshot, summary_line, write_snapshot};

use crate::error::{Error, SyncResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Read-only view of the Eventbrite API used by the sync
#[async_trait]
pub trait EventbriteApi: Send + Sync {
    /// Organizations the token's owner belongs to
    async fn list_organizations(&self) -> SyncResult<Vec<Organization>>;

    /// Live, current or future events of an organization, soonest first
    async fn list_events(&self, organization_id: &str) -> SyncResult<Vec<Value>>;
}

/// Pick the first organization of the authenticated account
pub async fn resolve_organization<A>(api: &A) -> SyncResult<Organization>
where
    A: EventbriteApi + ?Sized,
{
    info!("Fetching organization ID...");

    let organization = api
        .list_organizations()
        .await?
        .into_iter()
        .next()
        .ok_or(Error::NoOrganizations)?;

    info!(
        "Found organization: {} (ID: {})",
        organization.display_name(),
        organization.id
    );

    Ok(organization)
}

/// Fetch the raw upcoming events of an organization
pub async fn fetch_events<A>(api: &A, organization_id: &str) -> SyncResult<Vec<Value>>
where
    A: EventbriteApi + ?Sized,
{
    let events = api.list_events(organization_id).await?;
    info!("Received {} events from Eventbrite", events.len());
    Ok(events)
}
