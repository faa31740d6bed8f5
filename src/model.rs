use crate::traits::TextModel;
use crate::types::{GeminiConfig, Result, StylecastError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

const MODEL_CALL_TIMEOUT_SECS: u64 = 60;

// Wire types for the generateContent endpoint.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "thinkingConfig")]
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Text model backed by the Generative Language `generateContent` API.
/// Thinking budget is pinned to 0 to keep responses fast.
pub struct GeminiModel {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiModel {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(MODEL_CALL_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl TextModel for GeminiModel {
    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        debug!("sending completion request ({} prompt bytes)", prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StylecastError::Model(format!("HTTP {}: {}", status, detail)));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(StylecastError::Model("empty completion".to_string()));
        }

        debug!("received completion ({} bytes)", text.len());
        Ok(text)
    }
}

/// Scripted text model for tests and offline runs. Plays back queued
/// outcomes first, then falls back to a fixed response (or a fixed failure).
pub struct MockTextModel {
    fixed: Option<String>,
    fail: bool,
    scripted: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: AtomicUsize,
}

impl MockTextModel {
    /// A model that always returns `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            fixed: Some(response.into()),
            fail: false,
            scripted: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A model that fails every call.
    pub fn failing() -> Self {
        Self {
            fixed: None,
            fail: true,
            scripted: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A model that plays back `outcomes` in order, then fails.
    pub fn scripted(outcomes: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            fixed: None,
            fail: true,
            scripted: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completion calls issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    fn model_name(&self) -> String {
        "mock".to_string()
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .scripted
            .lock()
            .expect("mock script lock poisoned")
            .pop_front();
        if let Some(outcome) = next {
            return outcome.map_err(StylecastError::Model);
        }

        if self.fail {
            return Err(StylecastError::Model("mock failure".to_string()));
        }

        Ok(self.fixed.clone().unwrap_or_default())
    }
}
