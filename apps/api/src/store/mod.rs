//! Persistence seams for the FAQ knowledge base and processed resumes.
//!
//! Handlers and the pipeline only see `Arc<dyn KnowledgeStore>` /
//! `Arc<dyn RecordStore>`; `main` picks PostgreSQL or the in-memory backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::analysis::AnalysisRecord;
use crate::models::knowledge::KnowledgeEntry;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt stored data: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Returns entries in insertion order, at most `limit` of them when given.
    async fn list_entries(&self, limit: Option<usize>) -> Result<Vec<KnowledgeEntry>, StoreError>;

    async fn add_entry(&self, entry: &KnowledgeEntry) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_record(&self, record: &AnalysisRecord) -> Result<(), StoreError>;

    /// Returns every stored record, oldest first.
    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, StoreError>;
}
