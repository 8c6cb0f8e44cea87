//! Port traits for the publabel pipeline.
//!
//! Adapters live in the `publabel-ingest-*`, `publabel-export-*`, and
//! `publabel-storage-*` crates; the labeling engine lives in
//! `publabel-labeler`.

use anyhow::Result;
use publabel_schema::{ClusterLabeling, Message};

/// Handle to a chat completion service.
///
/// This is intentionally a port so the real service can be swapped for test
/// doubles, and so the handle is constructed and passed explicitly rather
/// than held in process-wide state.
pub trait CompletionBackend {
    /// Submit a message sequence to `model` and return the generated text.
    fn complete(&self, model: &str, messages: &[Message]) -> Result<String>;
}

/// Supplies, per cluster number, the concatenated publication titles.
///
/// The result is indexed by cluster number; `None` or an empty string means
/// "skip labeling for this cluster". Cluster numbers may be sparse.
pub trait TitleSource {
    fn read_titles(&self) -> Result<Vec<Option<String>>>;
}

/// Accepts the labeling per cluster number for persistence.
///
/// `None` entries were never labeled and must produce no output row.
pub trait LabelSink {
    fn write_labels(&self, labelings: &[Option<ClusterLabeling>]) -> Result<()>;
}

/// Labeling of a single cluster from its publication titles.
pub trait ClusterLabeler {
    fn label_cluster(&self, pub_titles: &str) -> Result<ClusterLabeling>;
}
