use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::pipeline::PipelineError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(PipelineError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Pipeline(PipelineError::EmptyContext) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Pipeline(PipelineError::Generation(_) | PipelineError::Parse(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Pipeline(PipelineError::Extraction(e)) => {
                tracing::warn!("Extraction failed: {e}");
                ("EXTRACTION_ERROR", format!("Could not read the document: {e}"))
            }
            AppError::Pipeline(PipelineError::EmptyContext) => {
                tracing::error!("Analysis refused: knowledge base is empty");
                (
                    "EMPTY_CONTEXT",
                    "The FAQ knowledge base is empty; add entries before analyzing resumes"
                        .to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Generation(e)) => {
                tracing::error!("LLM error: {e}");
                (
                    "LLM_ERROR",
                    "The text generation backend failed".to_string(),
                )
            }
            AppError::Pipeline(PipelineError::Parse(e)) => {
                tracing::error!("Parse error: {}; raw output: {:?}", e.reason, e.raw);
                (
                    "PARSE_ERROR",
                    "The analysis returned by the backend could not be decoded".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let stage = match &self {
            AppError::Pipeline(e) => Some(e.stage()),
            _ => None,
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "stage": stage
            }
        }));

        (status, body).into_response()
    }
}
