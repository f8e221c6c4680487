//! CLI entry-point running the risk and score flow once.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    assess::{self, score::ScoreParser, session::SessionState, FlowConfig},
    catalog::{ComparisonKind, Medication},
    config::Settings,
    llm::OpenAiClient,
};

/// Args for the `assess` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Primary OTC medication.
    #[arg(long)]
    pub medication: Medication,
    /// Disease or second medication, depending on the comparison kind.
    #[arg(long)]
    pub target: String,
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
    let flow = FlowConfig::from_settings(&settings);
    let target = flow.comparison.parse(&args.target)?;
    let client = OpenAiClient::new(&settings)?;

    let mut state = SessionState::new();
    assess::fetch_risks(&mut state, &client, args.medication).await?;
    assess::fetch_score(&mut state, &client, &flow, args.medication, target).await?;

    if let Some(risks) = state.risks() {
        println!("Risks for {}:\n{}\n", risks.medication, risks.text);
    }
    if let Some(score) = state.score() {
        println!("Polypharmic risk score ({}): {}\n{}", score.target, score.score, score.text);
    }
    Ok(())
}
