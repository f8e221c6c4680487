//! Per-browser session state for the assessment form.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Comparison, Medication};

use super::score::Score;

/// Risk text returned for one medication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub medication: Medication,
    pub text: String,
}

/// Score text returned for a medication/target pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub target: Comparison,
    pub text: String,
    pub score: Score,
}

/// One successful score fetch. Never edited once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub medication: Medication,
    pub target: Comparison,
    pub score: Score,
    pub recorded_at: DateTime<Utc>,
}

/// Message surfaced on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Warning(String),
    ServiceUnavailable(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(msg) | Notice::ServiceUnavailable(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    medication: Option<Medication>,
    risks: Option<RiskReport>,
    score: Option<ScoreReport>,
    history: Vec<HistoryEntry>,
    notice: Option<Notice>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the primary medication.
    ///
    /// Switching to a different medication drops its risk text and any score, so a
    /// fresh risk fetch is required before scoring again.
    pub fn select_medication(&mut self, medication: Medication) {
        if self.medication == Some(medication) {
            return;
        }
        self.medication = Some(medication);
        self.risks = None;
        self.score = None;
    }

    pub fn medication(&self) -> Option<Medication> {
        self.medication
    }

    /// True when risk text exists for the currently selected medication.
    pub fn risks_fetched(&self) -> bool {
        match (&self.risks, self.medication) {
            (Some(report), Some(current)) => report.medication == current,
            _ => false,
        }
    }

    pub fn risks(&self) -> Option<&RiskReport> {
        self.risks.as_ref()
    }

    pub fn score(&self) -> Option<&ScoreReport> {
        self.score.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn store_risks(&mut self, medication: Medication, text: String) {
        self.select_medication(medication);
        self.risks = Some(RiskReport { medication, text });
    }

    /// Store a score and append it to history.
    pub fn store_score(&mut self, report: ScoreReport) {
        let Some(medication) = self.medication else {
            return;
        };
        self.history.push(HistoryEntry {
            medication,
            target: report.target,
            score: report.score,
            recorded_at: Utc::now(),
        });
        self.score = Some(report);
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Hand the pending notice to the renderer exactly once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
