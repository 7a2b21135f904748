use crate::components::eventbrite::{
    fetch_events, normalize_events, resolve_organization, summary_line, write_snapshot,
    EventbriteApi, Snapshot,
};
use crate::config::Config;
use crate::error::{Error, SyncResult};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Run one sync against the current time
pub async fn run_sync<A>(api: &A, output_path: &Path) -> SyncResult<Snapshot>
where
    A: EventbriteApi + ?Sized,
{
    run_sync_at(api, output_path, Utc::now()).await
}

/// Resolve the organization, fetch, filter and write the snapshot.
///
/// Nothing is written unless both API calls succeed.
pub async fn run_sync_at<A>(api: &A, output_path: &Path, now: DateTime<Utc>) -> SyncResult<Snapshot>
where
    A: EventbriteApi + ?Sized,
{
    let organization = resolve_organization(api).await.map_err(|e| {
        error!("Error fetching organization: {}", e);
        e
    })?;

    let raw_events = fetch_events(api, &organization.id).await.map_err(|e| {
        error!("Error fetching events: {}", e);
        e
    })?;

    let events = normalize_events(&raw_events, now);
    let snapshot = Snapshot::new(&organization.id, events, now);
    info!("Found {} upcoming events", snapshot.count);

    write_snapshot(output_path, &snapshot)?;
    info!("Saved to {}", output_path.display());

    for event in &snapshot.events {
        info!("{}", summary_line(event));
    }

    Ok(snapshot)
}
