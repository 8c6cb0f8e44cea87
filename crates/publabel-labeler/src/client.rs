use anyhow::{Context, Result, bail};
use publabel_ports::CompletionBackend;
use publabel_schema::Message;
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;
use crate::tokens::MAX_COMPLETION_TOKENS;

/// Sampling parameters, identical for every labeling request.
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 1.0;
const FREQUENCY_PENALTY: f64 = 0.3;
const PRESENCE_PENALTY: f64 = 0.3;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: usize,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Backend that speaks the OpenAI chat completions protocol.
///
/// The HTTP client is built once and reused for every cluster in the run.
pub struct OpenAiBackend {
    client: reqwest::blocking::Client,
    config: OpenAiConfig,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("build HTTP client")?;
        Ok(Self { client, config })
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete(&self, model: &str, messages: &[Message]) -> Result<String> {
        let body = ChatRequest {
            model,
            temperature: TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
            messages,
        };

        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .context("chat completion request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            bail!("chat completion endpoint returned {status}: {text}");
        }

        let parsed: ChatResponse = resp.json().context("decode chat completion response")?;
        Ok(parsed
            .choices
            .into_iter()
            .map(|choice| choice.message.content.unwrap_or_default())
            .collect())
    }
}

/// Mock backend for testing.
pub struct MockBackend {
    pub response: String,
}

impl CompletionBackend for MockBackend {
    fn complete(&self, _model: &str, _messages: &[Message]) -> Result<String> {
        Ok(self.response.clone())
    }
}

/// Mock backend that always fails.
pub struct FailingBackend;

impl CompletionBackend for FailingBackend {
    fn complete(&self, _model: &str, _messages: &[Message]) -> Result<String> {
        bail!("completion backend failed (mock)")
    }
}
