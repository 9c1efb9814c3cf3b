use atcoder_calendar::startup;
use tracing::{error, info};

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting AtCoder calendar sync");

    // Failures are reported but never turn into a non-zero exit
    if let Err(e) = startup::run().await {
        error!("Sync aborted: {:?}", e);
    }

    Ok(())
}
