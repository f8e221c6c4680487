//! Runtime configuration utilities for phrs-assistant.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use serde::Deserialize;

use crate::{assess::score::ScoreParser, catalog::ComparisonKind};

const DEFAULT_BASE_URL: &str = "https://api.ai71.ai/v1/";
const DEFAULT_MODEL: &str = "tiiuae/falcon-180B-chat";
const DEFAULT_MAX_SESSIONS: usize = 10_000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the chat-completion endpoint.
    pub completion_base_url: String,
    /// Bearer credential for the completion endpoint. Blank disables the header.
    pub completion_api_key: String,
    /// Model name sent with every completion request.
    pub completion_model: String,
    /// What the second dropdown compares the medication against.
    pub comparison: ComparisonKind,
    /// Which score extraction feeds the history table.
    pub score_parser: ScoreParser,
    /// Folder holding the stylesheet served next to the form.
    pub static_dir: PathBuf,
    /// Fallback log directive when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Upper bound on live browser sessions; the least recently used goes first.
    pub max_sessions: usize,
    /// Seconds of inactivity after which a session is forgotten.
    pub session_idle_secs: u64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let completion_base_url =
            env::var("COMPLETION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let completion_api_key = env::var("COMPLETION_API_KEY").unwrap_or_default();
        let completion_model =
            env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let comparison = parse_var("PHRS_COMPARISON")?.unwrap_or(ComparisonKind::Disease);
        let score_parser = parse_var("PHRS_SCORE_PARSER")?.unwrap_or(ScoreParser::Tolerant);
        let static_dir = env::var("PHRS_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./static"));
        let log_filter = env::var("PHRS_LOG").unwrap_or_else(|_| "info".to_string());
        let max_sessions = parse_var("PHRS_MAX_SESSIONS")?.unwrap_or(DEFAULT_MAX_SESSIONS);
        let session_idle_secs =
            parse_var("PHRS_SESSION_IDLE_SECS")?.unwrap_or(DEFAULT_SESSION_IDLE_SECS);

        Ok(Self {
            completion_base_url,
            completion_api_key,
            completion_model,
            comparison,
            score_parser,
            static_dir,
            log_filter,
            max_sessions,
            session_idle_secs,
        })
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// Completion endpoint URL with the chat path appended.
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.completion_base_url.trim_end_matches('/')
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            completion_base_url: DEFAULT_BASE_URL.to_string(),
            completion_api_key: String::new(),
            completion_model: DEFAULT_MODEL.to_string(),
            comparison: ComparisonKind::Disease,
            score_parser: ScoreParser::Tolerant,
            static_dir: PathBuf::from("./static"),
            log_filter: "info".to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("parsing {key}")),
        _ => Ok(None),
    }
}
