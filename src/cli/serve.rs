//! CLI entry-point for serving the assessment form.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::{self, AppState},
    assess::score::ScoreParser,
    catalog::ComparisonKind,
    config::Settings,
    llm::OpenAiClient,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Override `PHRS_COMPARISON` for this run.
    #[arg(long, value_enum)]
    pub comparison: Option<ComparisonKind>,
    /// Score extraction, `tolerant` unless `PHRS_SCORE_PARSER` says otherwise.
    ///
    /// `tolerant` (the default) shows "score unavailable" when the reply has no
    /// number. `legacy` records such replies as a score of 0.
    #[arg(long, value_enum)]
    pub score_parser: Option<ScoreParser>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(comparison) = args.comparison {
        settings.comparison = comparison;
    }
    if let Some(parser) = args.score_parser {
        settings.score_parser = parser;
    }
    let client = OpenAiClient::new(&settings)?;
    let state = AppState::new(settings, Arc::new(client));
    api::serve(state, args.host, args.port).await
}
