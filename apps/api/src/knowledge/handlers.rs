use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::knowledge::KnowledgeEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Both fields optional at the serde level so a missing one becomes a
/// validation error instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct AddFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl AddFaqRequest {
    fn into_entry(self) -> Result<KnowledgeEntry, AppError> {
        match (non_blank(self.question), non_blank(self.answer)) {
            (Some(question), Some(answer)) => Ok(KnowledgeEntry { question, answer }),
            _ => Err(AppError::Validation(
                "Fields 'question' and 'answer' are required".to_string(),
            )),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/faq
pub async fn handle_add_faq(
    State(state): State<AppState>,
    payload: Result<Json<AddFaqRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let entry = request.into_entry()?;

    state.knowledge.add_entry(&entry).await?;
    info!("FAQ entry added");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "FAQ entry added" })),
    ))
}

/// GET /api/v1/faq
pub async fn handle_list_faq(
    State(state): State<AppState>,
) -> Result<Json<Vec<KnowledgeEntry>>, AppError> {
    let entries = state.knowledge.list_entries(None).await?;
    Ok(Json(entries))
}
