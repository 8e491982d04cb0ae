use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::looks_like_pdf;
use crate::models::analysis::{AnalysisRecord, AnalysisResult};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Validates the upload, runs extraction and analysis, then persists the
/// record. A storage failure after a successful analysis is reported as a
/// storage error, not an analysis error.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let (filename, document) = read_document_field(multipart).await?;
    validate_document(&filename, &document)?;

    info!("Analyzing uploaded resume '{filename}' ({} bytes)", document.len());
    let run = state.pipeline.analyze_document(document).await?;

    let record = AnalysisRecord::new(run.text, run.analysis.clone());
    state.records.insert_record(&record).await?;
    info!("Stored analysis record {}", record.id);

    Ok(Json(UploadResponse {
        message: "Resume processed successfully".to_string(),
        analysis: run.analysis,
    }))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    let records = state.records.list_records().await?;
    Ok(Json(records))
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Field 'message' is required".to_string()))?;

    let response = state.pipeline.chat(&message).await?;
    Ok(Json(ChatResponse { response }))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_document_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        return Ok((filename, data));
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}

/// Rejects anything that is not a PDF before extraction is attempted.
fn validate_document(filename: &str, document: &[u8]) -> Result<(), AppError> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if !looks_like_pdf(document) {
        return Err(AppError::Validation(
            "Uploaded file is not a valid PDF document".to_string(),
        ));
    }
    Ok(())
}
