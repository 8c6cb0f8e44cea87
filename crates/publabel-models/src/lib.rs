//! GPT models that can be used to label clusters.
//!
//! A closed table: each variant carries the wire identifier, the tokenizer
//! family used for token counting, and the context window in tokens.

use std::fmt;

/// A supported GPT chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GptModel {
    Gpt4Preview1106,
    Gpt4,
    Gpt4_32k,
    Gpt35Turbo1106,
    Gpt35Turbo,
    Gpt35Turbo16k,
}

impl GptModel {
    pub const ALL: [GptModel; 6] = [
        GptModel::Gpt4Preview1106,
        GptModel::Gpt4,
        GptModel::Gpt4_32k,
        GptModel::Gpt35Turbo1106,
        GptModel::Gpt35Turbo,
        GptModel::Gpt35Turbo16k,
    ];

    /// Model identifier as sent to the completion service.
    pub fn identifier(self) -> &'static str {
        match self {
            GptModel::Gpt4Preview1106 => "gpt-4-1106-preview",
            GptModel::Gpt4 => "gpt-4",
            GptModel::Gpt4_32k => "gpt-4-32k",
            GptModel::Gpt35Turbo1106 => "gpt-3.5-turbo-1106",
            GptModel::Gpt35Turbo => "gpt-3.5-turbo",
            GptModel::Gpt35Turbo16k => "gpt-3.5-turbo-16k",
        }
    }

    /// Tokenizer family the model's token counts are measured with.
    pub fn tokenizer_family(self) -> &'static str {
        match self {
            GptModel::Gpt4Preview1106 | GptModel::Gpt4 | GptModel::Gpt4_32k => "gpt-4",
            GptModel::Gpt35Turbo1106 | GptModel::Gpt35Turbo | GptModel::Gpt35Turbo16k => {
                "gpt-3.5-turbo"
            }
        }
    }

    /// Context window: the maximum number of prompt + completion tokens.
    pub fn max_context_tokens(self) -> usize {
        match self {
            GptModel::Gpt4Preview1106 => 128000,
            GptModel::Gpt4 => 8192,
            GptModel::Gpt4_32k => 32768,
            GptModel::Gpt35Turbo1106 => 16385,
            GptModel::Gpt35Turbo => 4097,
            GptModel::Gpt35Turbo16k => 16385,
        }
    }

    /// Look up a model by its wire identifier.
    pub fn from_identifier(identifier: &str) -> Option<GptModel> {
        GptModel::ALL
            .into_iter()
            .find(|model| model.identifier() == identifier)
    }
}

impl fmt::Display for GptModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_identifier() {
        let model = GptModel::from_identifier("gpt-3.5-turbo").unwrap();
        assert_eq!(model, GptModel::Gpt35Turbo);
        assert_eq!(model.max_context_tokens(), 4097);
        assert_eq!(model.tokenizer_family(), "gpt-3.5-turbo");
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert_eq!(GptModel::from_identifier("gpt-999"), None);
    }

    #[test]
    fn identifiers_are_unique() {
        for a in GptModel::ALL {
            assert_eq!(GptModel::from_identifier(a.identifier()), Some(a));
        }
    }

    #[test]
    fn context_windows_leave_room_for_a_completion() {
        for model in GptModel::ALL {
            assert!(model.max_context_tokens() > 320, "{model}");
        }
    }
}
