//! Core data types for the publabel pipeline.
//!
//! Defines the labeling record produced for each publication cluster and the
//! chat message types sent to the completion service. All other crates depend
//! on these types.

use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One chat message as sent to the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Labeling of one publication cluster.
///
/// Only ever constructed from a completion response that parsed as a JSON
/// object; fields the model left out are empty rather than missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLabeling {
    /// Short topic label (at most 3 words).
    pub short_label: String,
    /// Long topic label (at most 8 words).
    pub long_label: String,
    /// Keywords ordered by relevance.
    pub keywords: Vec<String>,
    /// Few-sentence topic summary.
    pub summary: String,
    /// URL of the closest Wikipedia page.
    pub wikipedia_page: String,
}

impl ClusterLabeling {
    /// Keywords joined with `"; "` in their original order.
    ///
    /// Returns `None` for an empty keyword list so sinks can write their own
    /// marker instead of an empty column.
    pub fn rendered_keywords(&self) -> Option<String> {
        if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::system("instructions")).unwrap();
        assert_eq!(json["role"], "system");
        let json = serde_json::to_value(Message::user("titles")).unwrap();
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn keywords_render_joined_in_order() {
        let labeling = ClusterLabeling {
            short_label: "Topic".into(),
            long_label: "A Topic".into(),
            keywords: vec!["A".into(), "B".into(), "C".into()],
            summary: String::new(),
            wikipedia_page: String::new(),
        };
        assert_eq!(labeling.rendered_keywords().unwrap(), "A; B; C");
    }

    #[test]
    fn empty_keywords_render_as_none() {
        let labeling = ClusterLabeling {
            short_label: String::new(),
            long_label: String::new(),
            keywords: vec![],
            summary: String::new(),
            wikipedia_page: String::new(),
        };
        assert_eq!(labeling.rendered_keywords(), None);
    }
}
