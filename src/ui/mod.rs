//! HTML rendering of the assessment form from session state.

use askama::Template;

use crate::{
    assess::{
        session::{Notice, SessionState},
        FlowConfig, RiskLayout,
    },
    catalog::{ComparisonKind, Medication},
};

pub const RISK_PLACEHOLDER: &str =
    "No risks fetched yet. Please select a medication and click 'Get Risks'.";

/// A `<option>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub medication: String,
    pub target: String,
    pub score: String,
    pub recorded_at: String,
}

/// Everything the page template needs, computed up front.
#[derive(Debug, Clone, Template)]
#[template(path = "index.html")]
pub struct PageView {
    pub medications: Vec<OptionView>,
    pub comparison_label: &'static str,
    pub target_header: &'static str,
    pub targets: Vec<OptionView>,
    pub score_disabled: bool,
    pub notice_class: &'static str,
    pub notice_message: String,
    pub has_risks: bool,
    pub risk_bullets: bool,
    pub risk_text: String,
    pub risk_lines: Vec<String>,
    pub has_score: bool,
    pub score_value: String,
    pub score_text: String,
    pub score_placeholder: String,
    pub show_history: bool,
    pub history: Vec<HistoryRow>,
}

impl PageView {
    pub fn build(state: &SessionState, config: &FlowConfig) -> Self {
        let current = state.medication().unwrap_or(Medication::ALL[0]);
        let medications = Medication::ALL
            .iter()
            .map(|m| OptionView {
                value: m.name(),
                selected: *m == current,
            })
            .collect();

        let chosen_target = state.score().map(|s| s.target.name());
        let targets = config
            .comparison
            .options()
            .into_iter()
            .enumerate()
            .map(|(idx, name)| OptionView {
                value: name,
                selected: match chosen_target {
                    Some(chosen) => chosen == name,
                    None => idx == 0,
                },
            })
            .collect();

        let (notice_class, notice_message) = match state.notice() {
            Some(Notice::Warning(msg)) => ("warning", msg.clone()),
            Some(Notice::ServiceUnavailable(msg)) => ("error", msg.clone()),
            None => ("", String::new()),
        };

        let risk_text = state
            .risks()
            .filter(|_| state.risks_fetched())
            .map(|r| r.text.clone())
            .filter(|text| !text.is_empty());
        let risk_lines = match (&risk_text, config.risk_layout) {
            (Some(text), RiskLayout::Bullets) => risk_lines(text),
            _ => Vec::new(),
        };

        let score = state.score().filter(|s| !s.text.is_empty());

        let (target_header, score_placeholder) = match config.comparison {
            ComparisonKind::Disease => (
                "Disease",
                "No score calculated yet. Please select a disease and click 'Get Score'.",
            ),
            ComparisonKind::Medication => (
                "Second Medication",
                "No score calculated yet. Please select a second medication and click 'Get Score'.",
            ),
        };

        let history = state
            .history()
            .iter()
            .map(|entry| HistoryRow {
                medication: entry.medication.to_string(),
                target: entry.target.to_string(),
                score: entry.score.to_string(),
                recorded_at: entry.recorded_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            })
            .collect();

        Self {
            medications,
            comparison_label: config.comparison.label(),
            target_header,
            targets,
            score_disabled: config.gate_score_button && !state.risks_fetched(),
            notice_class,
            notice_message,
            has_risks: risk_text.is_some(),
            risk_bullets: config.risk_layout == RiskLayout::Bullets,
            risk_text: risk_text.unwrap_or_else(|| RISK_PLACEHOLDER.to_string()),
            risk_lines,
            has_score: score.is_some(),
            score_value: score.map(|s| s.score.to_string()).unwrap_or_default(),
            score_text: score.map(|s| s.text.clone()).unwrap_or_default(),
            score_placeholder: score_placeholder.to_string(),
            show_history: config.show_history,
            history,
        }
    }
}

/// Split model risk text into bullet lines, dropping blank ones.
pub fn risk_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        assess::session::ScoreReport,
        assess::score::Score,
        catalog::{Comparison, Disease},
    };

    #[test]
    fn empty_state_renders_placeholders() {
        let view = PageView::build(&SessionState::new(), &FlowConfig::for_comparison(ComparisonKind::Disease));
        assert!(!view.has_risks);
        assert_eq!(view.risk_text, RISK_PLACEHOLDER);
        assert!(!view.has_score);
        assert!(view.score_disabled);
        assert!(view.medications[0].selected);
        assert!(view.targets[0].selected);
    }

    #[test]
    fn ungated_button_stays_enabled() {
        let config = FlowConfig {
            gate_score_button: false,
            ..FlowConfig::for_comparison(ComparisonKind::Disease)
        };
        assert!(!PageView::build(&SessionState::new(), &config).score_disabled);
    }

    #[test]
    fn unparsed_score_is_labelled() {
        let mut state = SessionState::new();
        state.store_risks(Medication::Aspirin, "1. Bleeding".into());
        state.store_score(ScoreReport {
            target: Comparison::Disease(Disease::Diabetes),
            text: "Hard to say.".into(),
            score: Score::Unparsed,
        });
        let view = PageView::build(&state, &FlowConfig::for_comparison(ComparisonKind::Disease));
        assert_eq!(view.score_value, "score unavailable");
        assert_eq!(view.history[0].score, "score unavailable");
        assert!(view.targets.iter().any(|t| t.selected && t.value == "Diabetes"));
        assert!(!view.score_disabled);
    }

    #[test]
    fn risk_lines_skip_blank_lines() {
        let lines = risk_lines("1. Liver damage: ...\n\n   2. Ulcers: ...  \n");
        assert_eq!(lines, vec!["1. Liver damage: ...", "2. Ulcers: ..."]);
    }
}
