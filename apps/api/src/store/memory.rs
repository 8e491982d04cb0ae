use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::analysis::AnalysisRecord;
use crate::models::knowledge::KnowledgeEntry;
use crate::store::{KnowledgeStore, RecordStore, StoreError};

/// Process-local store. Used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<KnowledgeEntry>>,
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            records: RwLock::default(),
        }
    }
}

#[async_trait]
impl KnowledgeStore for MemoryStore {
    async fn list_entries(&self, limit: Option<usize>) -> Result<Vec<KnowledgeEntry>, StoreError> {
        let entries = self.entries.read().await;
        let limit = limit.unwrap_or(entries.len());
        Ok(entries.iter().take(limit).cloned().collect())
    }

    async fn add_entry(&self, entry: &KnowledgeEntry) -> Result<(), StoreError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_record(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}
