//! Traits for the capture store, the capture log sink and the view renderer.

use crate::{CaptureEvent, NewRecord, Record};
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only holder of captured records.
///
/// Contract: ids returned by `append` start at 1 and strictly increase across the store's
/// lifetime, including after eviction. `snapshot` returns records in insertion order.
#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Store a record and return its sequence id.
    async fn append(&self, record: NewRecord) -> u64;

    /// Point-in-time copy of every held record, oldest first.
    async fn snapshot(&self) -> Vec<Arc<Record>>;

    /// Number of records currently held.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Consumer of capture events (console log, test recorder).
pub trait CaptureSink: Send + Sync {
    fn captured(&self, event: &CaptureEvent);
}

/// Turns records (already ordered newest first) into a document.
pub trait Renderer: Send + Sync {
    fn render(&self, records: &[Arc<Record>]) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("serialize record {id}: {source}")]
    Serialize {
        id: u64,
        #[source]
        source: serde_json::Error,
    },
    #[error("render error: {0}")]
    Other(String),
}
