use crate::components::reconciler::{SyncAction, SyncReport};
use crate::components::{AtCoderListing, ContestSource, GoogleCalendarHandle, Reconciler};
use crate::config::Config;
use crate::error::{AppResult, Error};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,html5ever=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> AppResult<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e)
        }
    }
}

/// Fetch the listing and sync it into the calendar
pub async fn run() -> AppResult<SyncReport> {
    let config = load_config().await?;

    let contests_url = config.read().await.contests_url.clone();
    let listing = AtCoderListing::new(&contests_url)?;
    let contests = listing.fetch_contests().await;

    let calendar = GoogleCalendarHandle::new(Arc::clone(&config)).await;
    let reconciler = Reconciler::new(calendar);

    let result = reconciler.sync(&contests).await;

    // Stop the actor whether or not the run succeeded
    if let Err(e) = reconciler.gateway().shutdown().await {
        error!("Error shutting down Google Calendar actor: {:?}", e);
    }

    let report = result?;
    info!("Sync finished: {}", report);
    for outcome in &report.outcomes {
        if let SyncAction::Failed(reason) = &outcome.action {
            warn!("Not synced: {} ({})", outcome.name, reason);
        }
    }

    Ok(report)
}
