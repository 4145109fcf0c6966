//! In-memory capture store: FIFO deque plus id counter under one lock.

use hook_types::{CaptureStore, NewRecord, Record};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Inner {
    records: VecDeque<Arc<Record>>,
    /// Id handed to the next append; never decremented.
    next_id: u64,
}

/// In-memory CaptureStore (process lifetime only). Unbounded unless `max_records` is set, in
/// which case the oldest records are evicted first.
pub struct InMemoryCaptureStore {
    inner: RwLock<Inner>,
    max_records: Option<NonZeroUsize>,
}

impl InMemoryCaptureStore {
    pub fn new(max_records: Option<NonZeroUsize>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: VecDeque::new(),
                next_id: 1,
            }),
            max_records,
        }
    }
}

impl Default for InMemoryCaptureStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait::async_trait]
impl CaptureStore for InMemoryCaptureStore {
    async fn append(&self, record: NewRecord) -> u64 {
        let mut guard = self.inner.write().await;
        let id = guard.next_id;
        guard.next_id += 1;
        if let Some(max) = self.max_records {
            while guard.records.len() >= max.get() {
                guard.records.pop_front();
            }
        }
        guard.records.push_back(Arc::new(Record::from_new(id, record)));
        id
    }

    async fn snapshot(&self) -> Vec<Arc<Record>> {
        let guard = self.inner.read().await;
        guard.records.iter().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
