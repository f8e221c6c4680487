//! Extraction of the numeric polypharmic risk score from free text.

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score pulled out of a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Score {
    Value(i64),
    /// No number could be found. Distinct from a genuine zero.
    Unparsed,
}

impl Score {
    pub fn value(self) -> Option<i64> {
        match self {
            Score::Value(v) => Some(v),
            Score::Unparsed => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Value(v) => write!(f, "{v}"),
            Score::Unparsed => f.write_str("score unavailable"),
        }
    }
}

/// Which extraction strategy is recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreParser {
    /// First-line `:` split; failures become `Value(0)`.
    Legacy,
    /// Labelled numeric scan; failures become `Unparsed`.
    Tolerant,
}

impl ScoreParser {
    pub fn extract(self, text: &str) -> Score {
        match self {
            ScoreParser::Legacy => Score::Value(legacy_score(text)),
            ScoreParser::Tolerant => scan_score(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown score parser: {0}")]
pub struct UnknownScoreParser(pub String);

impl FromStr for ScoreParser {
    type Err = UnknownScoreParser;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(ScoreParser::Legacy),
            "tolerant" => Ok(ScoreParser::Tolerant),
            other => Err(UnknownScoreParser(other.to_string())),
        }
    }
}

/// Historical extraction kept for compatibility with recorded history.
///
/// Takes the token after the first `:` on the first line. Anything that does not
/// parse as an integer yields 0, which cannot be told apart from a real zero.
/// Tokens beyond the `i64` range also yield 0.
pub fn legacy_score(text: &str) -> i64 {
    let first_line = text.split('\n').next().unwrap_or_default();
    first_line
        .split(':')
        .nth(1)
        .and_then(|segment| segment.split_whitespace().next())
        .and_then(|token| token.parse::<i64>().ok())
        .unwrap_or(0)
}

static SCORE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:phrs|score)\b").expect("valid regex"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s*_#`>\[(]*(-?\d+)").expect("valid regex"));

/// Tolerant scan for a labelled score.
///
/// Tries every line mentioning a score in order, then the first line, and keeps
/// the first integer found after a line's first `:` (markdown decoration skipped).
pub fn scan_score(text: &str) -> Score {
    text.lines()
        .filter(|line| SCORE_LABEL.is_match(line) && line.contains(':'))
        .chain(text.lines().take(1))
        .find_map(number_after_colon)
        .map(Score::Value)
        .unwrap_or(Score::Unparsed)
}

fn number_after_colon(line: &str) -> Option<i64> {
    let after_colon = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line,
    };
    LEADING_NUMBER
        .captures(after_colon)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}
