//! Assessment flow: risk listing, scoring and the session they mutate.

pub mod prompt;
pub mod score;
pub mod session;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    catalog::{Comparison, ComparisonKind, Medication},
    config::Settings,
    llm::{CompletionClient, CompletionError},
};

use self::{
    score::ScoreParser,
    session::{Notice, ScoreReport, SessionState},
};

/// How risk text is laid out in the result box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLayout {
    /// Model text as one block.
    Block,
    /// One bullet per non-empty line.
    Bullets,
}

/// Knobs distinguishing the disease and two-medication screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowConfig {
    pub comparison: ComparisonKind,
    pub risk_layout: RiskLayout,
    pub gate_score_button: bool,
    pub show_history: bool,
    pub score_parser: ScoreParser,
}

impl FlowConfig {
    pub fn for_comparison(comparison: ComparisonKind) -> Self {
        match comparison {
            ComparisonKind::Disease => Self {
                comparison,
                risk_layout: RiskLayout::Block,
                gate_score_button: true,
                show_history: true,
                score_parser: ScoreParser::Tolerant,
            },
            ComparisonKind::Medication => Self {
                comparison,
                risk_layout: RiskLayout::Bullets,
                gate_score_button: true,
                show_history: false,
                score_parser: ScoreParser::Tolerant,
            },
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            score_parser: settings.score_parser,
            ..Self::for_comparison(settings.comparison)
        }
    }
}

#[derive(Debug, Error)]
pub enum AssessError {
    #[error("Please get the risks for the medication first by clicking 'Get Risks'.")]
    MissingRisks,
    #[error("comparison must be a {expected:?}, got {got:?}")]
    WrongComparison {
        expected: ComparisonKind,
        got: ComparisonKind,
    },
    #[error("completion service unavailable, please retry: {0}")]
    Upstream(#[from] CompletionError),
}

impl AssessError {
    /// Notice shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            AssessError::MissingRisks | AssessError::WrongComparison { .. } => {
                Notice::Warning(self.to_string())
            }
            AssessError::Upstream(_) => Notice::ServiceUnavailable(
                "The risk assistant is unavailable right now. Please retry.".to_string(),
            ),
        }
    }
}

/// Fetch the top-10 risk list for `medication` and store it.
///
/// On failure the session keeps whatever it held before and gets a notice.
#[instrument(skip(state, client))]
pub async fn fetch_risks(
    state: &mut SessionState,
    client: &dyn CompletionClient,
    medication: Medication,
) -> Result<(), AssessError> {
    state.select_medication(medication);
    let prompt = prompt::risk_prompt(medication);
    match client.complete(&prompt).await {
        Ok(text) => {
            info!(chars = text.len(), "stored risk text");
            state.store_risks(medication, text);
            Ok(())
        }
        Err(err) => {
            warn!(%err, "risk fetch failed");
            let err = AssessError::from(err);
            state.set_notice(err.notice());
            Err(err)
        }
    }
}

/// Fetch the polypharmic risk score of `medication` against `target`.
///
/// Requires risk text for the same medication. A successful call appends exactly
/// one history entry.
#[instrument(skip(state, client, config))]
pub async fn fetch_score(
    state: &mut SessionState,
    client: &dyn CompletionClient,
    config: &FlowConfig,
    medication: Medication,
    target: Comparison,
) -> Result<(), AssessError> {
    state.select_medication(medication);
    let result = score_inner(state, client, config, medication, target).await;
    if let Err(err) = &result {
        warn!(%err, "score fetch failed");
        state.set_notice(err.notice());
    }
    result
}

async fn score_inner(
    state: &mut SessionState,
    client: &dyn CompletionClient,
    config: &FlowConfig,
    medication: Medication,
    target: Comparison,
) -> Result<(), AssessError> {
    if target.kind() != config.comparison {
        return Err(AssessError::WrongComparison {
            expected: config.comparison,
            got: target.kind(),
        });
    }
    let risks = match state.risks() {
        Some(report) if state.risks_fetched() && !report.text.is_empty() => report.text.clone(),
        _ => return Err(AssessError::MissingRisks),
    };
    let prompt = prompt::score_prompt(medication, &risks, &target);
    let text = client.complete(&prompt).await?;
    let score = config.score_parser.extract(&text);
    info!(?score, "stored score text");
    state.store_score(ScoreReport {
        target,
        text,
        score,
    });
    Ok(())
}
