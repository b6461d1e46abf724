use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use filedock_core::StatusCheck;
use filedock_metadata::error::MetadataError;
use filedock_metadata::store::StatusStore;

/// In-memory [`StatusStore`] keyed by insertion sequence.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    checks: DashMap<u64, StatusCheck>,
    next_seq: AtomicU64,
}

impl MemoryStatusStore {
    /// Create a new empty in-memory status store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn insert(&self, check: &StatusCheck) -> Result<(), MetadataError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.checks.insert(seq, check.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StatusCheck>, MetadataError> {
        let mut entries: Vec<(u64, StatusCheck)> = self
            .checks
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, check)| check).collect())
    }
}
