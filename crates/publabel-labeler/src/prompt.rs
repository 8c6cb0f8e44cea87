use std::sync::LazyLock;

use publabel_schema::Message;
use regex::Regex;

/// Fixed instruction given to the model for every cluster.
pub const SYSTEM_PROMPT: &str = "You will be provided with the titles of a representative sample of papers from a larger cluster of related scientific papers.\n\nYour task is to identify the topic of the entire cluster based on the titles of the representative papers.\n\nOutput the following items (in English) that describe the topic of the cluster: 'short label' (at most 3 words and format in Title Case), 'long label' (at most 8 words and format in Title Case), list of 10 'keywords' (ordered by relevance and format in Title Case), 'summary' (few sentences), and 'wikipedia page' (URL).\nDo not start short and long labels with the word \"The\".\nStart each summary with \"This cluster of papers\".\nFormat the output in JSON.";

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new("<[^>]*>").unwrap());

/// Remove embedded markup tags from a title blob.
pub fn strip_markup(pub_titles: &str) -> String {
    MARKUP_TAG.replace_all(pub_titles, "").into_owned()
}

/// Assemble the two-message prompt for one cluster.
pub fn build_messages(pub_titles: &str) -> Vec<Message> {
    vec![Message::system(SYSTEM_PROMPT), Message::user(pub_titles)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use publabel_schema::Role;

    #[test]
    fn markup_tags_are_stripped() {
        let cleaned = strip_markup("Effects of <i>E. coli</i> on <sub>2</sub> uptake.");
        assert_eq!(cleaned, "Effects of E. coli on 2 uptake.");
    }

    #[test]
    fn text_without_markup_is_unchanged() {
        let titles = "Deep learning for protein folding. Graph neural networks.";
        assert_eq!(strip_markup(titles), titles);
    }

    #[test]
    fn prompt_is_system_then_user() {
        let messages = build_messages("Title one. Title two.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Title one. Title two.");
    }
}
