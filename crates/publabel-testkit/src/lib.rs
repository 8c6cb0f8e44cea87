//! Small helpers for building fixtures in tests.
//!
//! Keeping these in a microcrate avoids copy-paste across the labeler,
//! ingest, and storage tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Result, bail};
use publabel_ports::CompletionBackend;
use publabel_schema::{Message, Role};

/// A well-formed labeling payload with every field filled.
pub fn example_labeling_json() -> String {
    serde_json::json!({
        "short label": "Example Topic",
        "long label": "An Example Research Topic",
        "keywords": ["alpha", "beta"],
        "summary": "This cluster of papers is about examples.",
        "wikipedia page": "https://en.wikipedia.org/wiki/Example"
    })
    .to_string()
}

/// Wrap a payload in a markdown JSON code fence.
pub fn fenced(payload: &str) -> String {
    format!("```json\n{payload}\n```")
}

/// One scripted outcome of a completion call.
pub enum Reply {
    Content(String),
    TransportError(String),
}

/// Backend that replays a fixed sequence of outcomes, one per call.
///
/// Records how often it was called and the user content of the last prompt,
/// through handles that stay usable after the backend is boxed.
pub struct ScriptedBackend {
    replies: RefCell<VecDeque<Reply>>,
    calls: Rc<Cell<u32>>,
    last_user_content: Rc<RefCell<Option<String>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: Rc::new(Cell::new(0)),
            last_user_content: Rc::new(RefCell::new(None)),
        }
    }

    /// Handle to the number of completed calls.
    pub fn call_count(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.calls)
    }

    /// Handle to the user content of the most recent prompt.
    pub fn sent_user_content(&self) -> Rc<RefCell<Option<String>>> {
        Rc::clone(&self.last_user_content)
    }
}

impl CompletionBackend for ScriptedBackend {
    fn complete(&self, _model: &str, messages: &[Message]) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        *self.last_user_content.borrow_mut() = messages
            .iter()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.clone());

        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Content(text)) => Ok(text),
            Some(Reply::TransportError(message)) => bail!("{message}"),
            None => bail!("scripted backend ran out of replies"),
        }
    }
}
