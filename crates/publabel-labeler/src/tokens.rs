use anyhow::{Context, Result, bail};
use publabel_models::GptModel;
use publabel_schema::Message;
use tiktoken_rs::{ChatCompletionRequestMessage, num_tokens_from_messages};

use crate::prompt;

/// Token allowance reserved for the completion; also the request's
/// `max_tokens`.
pub const MAX_COMPLETION_TOKENS: usize = 320;

/// Characters dropped from the end of the user content per shortening round.
const SHORTEN_STEP_CHARS: usize = 400;

/// A message sequence guaranteed to fit the model's context window.
#[derive(Debug, Clone)]
pub struct BoundedPrompt {
    pub messages: Vec<Message>,
    /// True when the user content had to be cut to fit.
    pub shortened: bool,
}

/// Count the tokens of a message sequence under the given tokenizer family.
pub fn count_tokens(tokenizer_family: &str, messages: &[Message]) -> Result<usize> {
    let converted: Vec<ChatCompletionRequestMessage> = messages
        .iter()
        .map(|message| ChatCompletionRequestMessage {
            role: message.role.as_str().to_string(),
            content: Some(message.content.clone()),
            ..Default::default()
        })
        .collect();
    num_tokens_from_messages(tokenizer_family, &converted)
        .with_context(|| format!("count tokens for tokenizer family {tokenizer_family}"))
}

/// Build the prompt for `pub_titles` and shorten the user content until the
/// sequence fits within `max_context_tokens - MAX_COMPLETION_TOKENS`.
pub fn fit_to_context(model: GptModel, pub_titles: &str) -> Result<BoundedPrompt> {
    let budget = model.max_context_tokens() - MAX_COMPLETION_TOKENS;
    let mut content = pub_titles.to_string();
    let mut messages = prompt::build_messages(&content);
    let mut shortened = false;
    while count_tokens(model.tokenizer_family(), &messages)? > budget {
        if content.is_empty() {
            bail!(
                "system prompt alone exceeds the {budget} token budget of {}",
                model.identifier()
            );
        }
        content = drop_trailing_chars(&content, SHORTEN_STEP_CHARS);
        shortened = true;
        messages = prompt::build_messages(&content);
    }
    Ok(BoundedPrompt {
        messages,
        shortened,
    })
}

fn drop_trailing_chars(text: &str, count: usize) -> String {
    let keep = text.chars().count().saturating_sub(count);
    text.chars().take(keep).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_titles_are_kept_intact() {
        let bounded = fit_to_context(GptModel::Gpt35Turbo, "Title one. Title two.").unwrap();
        assert!(!bounded.shortened);
        assert_eq!(bounded.messages[1].content, "Title one. Title two.");
    }

    #[test]
    fn oversized_titles_are_shortened_to_fit() {
        let model = GptModel::Gpt35Turbo;
        let titles = "Measuring the scholarly impact of interdisciplinary research. ".repeat(500);
        let budget = model.max_context_tokens() - MAX_COMPLETION_TOKENS;

        let initial = count_tokens(model.tokenizer_family(), &prompt::build_messages(&titles));
        assert!(initial.unwrap() > budget, "fixture must exceed the budget");

        let bounded = fit_to_context(model, &titles).unwrap();
        assert!(bounded.shortened);
        let cost = count_tokens(model.tokenizer_family(), &bounded.messages).unwrap();
        assert!(cost <= budget);
        assert!(titles.starts_with(&bounded.messages[1].content));
    }

    #[test]
    fn shortening_respects_multibyte_characters() {
        let text = "é".repeat(500);
        let kept = drop_trailing_chars(&text, 400);
        assert_eq!(kept.chars().count(), 100);
        assert_eq!(kept, "é".repeat(100));
    }

    proptest! {
        #[test]
        fn dropped_text_is_a_prefix(text in ".{0,600}", count in 0usize..500) {
            let kept = drop_trailing_chars(&text, count);
            prop_assert!(text.starts_with(&kept));
            prop_assert_eq!(
                kept.chars().count(),
                text.chars().count().saturating_sub(count)
            );
        }
    }
}
