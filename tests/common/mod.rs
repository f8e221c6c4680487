#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use futures::{future::BoxFuture, FutureExt};
use phrs_assistant::llm::{CompletionClient, CompletionError};
use reqwest::StatusCode;

pub const RISK_FIXTURE: &str = "1. Liver damage: Long-term high doses strain the liver. Severity: Severe. Frequency: Uncommon.\n\n2. Kidney strain: Chronic use may reduce renal function. Severity: High. Frequency: Rare.";
pub const SCORE_FIXTURE: &str = "Score: 85 (high interaction risk)\nThe combination raises bleeding risk.";

/// Deterministic stand-in for the completion endpoint.
///
/// Each call pops the next scripted reply; `None` simulates an upstream outage.
#[derive(Clone, Default)]
pub struct FixtureClient {
    replies: Arc<Mutex<VecDeque<Option<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FixtureClient {
    pub fn new<'a>(replies: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(
                replies.into_iter().map(|r| r.map(str::to_string)).collect(),
            )),
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl CompletionClient for FixtureClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front().flatten();
        let result = reply.ok_or_else(|| CompletionError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "fixture outage".into(),
        });
        futures::future::ready(result).boxed()
    }
}
