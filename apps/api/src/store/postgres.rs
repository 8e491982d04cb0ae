use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::analysis::{AnalysisRecord, AnalysisRecordRow};
use crate::models::knowledge::KnowledgeEntry;
use crate::store::{KnowledgeStore, RecordStore, StoreError};

/// PostgreSQL-backed store for both FAQ entries and analysis records.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KnowledgeStore for PgStore {
    async fn list_entries(&self, limit: Option<usize>) -> Result<Vec<KnowledgeEntry>, StoreError> {
        // LIMIT NULL is "no limit" in PostgreSQL.
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let entries = sqlx::query_as::<_, KnowledgeEntry>(
            "SELECT question, answer FROM faq_entries ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn add_entry(&self, entry: &KnowledgeEntry) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO faq_entries (question, answer) VALUES ($1, $2)")
            .bind(&entry.question)
            .bind(&entry.answer)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_record(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO analysis_records
                (id, text, level, justification, suggestions, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.text)
        .bind(record.analysis.level.as_str())
        .bind(&record.analysis.justification)
        .bind(&record.analysis.suggestions)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AnalysisRecordRow>(
            "SELECT id, text, level, justification, suggestions, created_at \
             FROM analysis_records ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| AnalysisRecord::try_from(row).map_err(StoreError::Corrupt))
            .collect()
    }
}
