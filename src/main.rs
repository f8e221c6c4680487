//! Entry point wiring CLI dispatch to the assessment service.

use anyhow::Result;
use phrs_assistant::{cli::Cli, config::Settings, logging};
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init_tracing(&settings.log_filter)?;
    let cli = Cli::parse();

    info!(?cli, "starting command");
    cli.dispatch(settings).await
}
