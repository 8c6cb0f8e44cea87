//! GPT-backed labeling of publication clusters.
//!
//! One labeling attempt assembles a two-message prompt from a cluster's
//! publication titles, shortens it to the model's context window, submits it
//! to the completion service, and parses the answer into a
//! [`ClusterLabeling`]. Transport and parse failures restart the whole
//! attempt from the original titles under the configured retry policy.

mod client;
mod config;
mod parse;
mod prompt;
mod tokens;

pub use client::{FailingBackend, MockBackend, OpenAiBackend};
pub use config::OpenAiConfig;
pub use parse::parse_labeling;
pub use prompt::{SYSTEM_PROMPT, build_messages, strip_markup};
pub use tokens::{BoundedPrompt, MAX_COMPLETION_TOKENS, count_tokens, fit_to_context};

use std::time::Duration;

use anyhow::Result;
use publabel_models::GptModel;
use publabel_ports::{ClusterLabeler, CompletionBackend};
use publabel_retry::{AttemptFailure, RetryPolicy};
use publabel_schema::ClusterLabeling;

/// Delay between failed attempts.
const RETRY_DELAY: Duration = Duration::from_secs(30);

/// Labels clusters by prompting a GPT chat model.
pub struct GptClusterLabeler {
    backend: Box<dyn CompletionBackend>,
    model: GptModel,
    policy: RetryPolicy,
}

impl GptClusterLabeler {
    /// Labeler with the default policy: retry forever, 30 seconds between
    /// attempts.
    pub fn new(backend: Box<dyn CompletionBackend>, model: GptModel) -> Self {
        Self::with_policy(backend, model, RetryPolicy::unbounded(RETRY_DELAY))
    }

    /// Labeler with a caller-chosen retry policy.
    pub fn with_policy(
        backend: Box<dyn CompletionBackend>,
        model: GptModel,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            model,
            policy,
        }
    }

    fn attempt(&self, pub_titles: &str) -> Result<ClusterLabeling, AttemptFailure> {
        let cleaned = prompt::strip_markup(pub_titles);
        let bounded =
            tokens::fit_to_context(self.model, &cleaned).map_err(AttemptFailure::Fatal)?;
        if bounded.shortened {
            eprintln!(
                "WARN: publication titles too long; prompt shortened to fit {}",
                self.model.identifier()
            );
        }

        let response = self
            .backend
            .complete(self.model.identifier(), &bounded.messages)
            .map_err(AttemptFailure::Transient)?;

        parse::parse_labeling(&response).map_err(|e| {
            eprintln!("WARN: could not parse completion response: {e:#}");
            eprintln!("{response}");
            AttemptFailure::Transient(e)
        })
    }
}

impl ClusterLabeler for GptClusterLabeler {
    /// Every attempt restarts from the caller's original titles; the only
    /// externally visible effect of transient failures is latency.
    fn label_cluster(&self, pub_titles: &str) -> Result<ClusterLabeling> {
        self.policy.run(|_| self.attempt(pub_titles))
    }
}
