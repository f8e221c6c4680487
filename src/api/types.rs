//! Shared DTOs for JSON responses.

use serde::Serialize;

use crate::{
    assess::session::{HistoryEntry, Notice, RiskReport, ScoreReport, SessionState},
    catalog::ComparisonKind,
};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogDto {
    pub medications: Vec<&'static str>,
    pub comparison: ComparisonKind,
    pub targets: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub medication: Option<String>,
    pub risks_fetched: bool,
    pub risks: Option<RiskReport>,
    pub score: Option<ScoreReport>,
    pub history: Vec<HistoryEntry>,
    pub notice: Option<Notice>,
}

impl From<&SessionState> for SessionDto {
    fn from(state: &SessionState) -> Self {
        SessionDto {
            medication: state.medication().map(|m| m.to_string()),
            risks_fetched: state.risks_fetched(),
            risks: state.risks().cloned(),
            score: state.score().cloned(),
            history: state.history().to_vec(),
            notice: state.notice().cloned(),
        }
    }
}
