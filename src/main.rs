use eventbrite_sync::components::EventbriteClient;
use eventbrite_sync::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Fetching events from Eventbrite...");

    // Token is checked here, before any request is made
    let config = startup::load_config()?;

    let client = EventbriteClient::new(&config);
    startup::run_sync(&client, &config.output_path).await?;

    Ok(())
}
