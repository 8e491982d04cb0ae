//! Pipeline Orchestrator — sequences context, prompt, generation and parsing.
//!
//! Stateless: every run works on its own locals. The only shared pieces are
//! the knowledge store and the generation client, both behind `Arc`.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::parser::{parse_analysis, ParseError};
use crate::analysis::prompts::PromptContext;
use crate::extraction::{self, ExtractionError};
use crate::knowledge::build_knowledge_context;
use crate::llm_client::{GenerationClient, LlmError};
use crate::models::analysis::AnalysisResult;
use crate::store::KnowledgeStore;

/// Failure of one pipeline run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction stage failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("context stage failed: knowledge base is empty")]
    EmptyContext,

    #[error("generation stage failed: {0}")]
    Generation(#[from] LlmError),

    #[error("parse stage failed: {0}")]
    Parse(#[from] ParseError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Extraction(_) => "extraction",
            PipelineError::EmptyContext => "context",
            PipelineError::Generation(_) => "generation",
            PipelineError::Parse(_) => "parse",
        }
    }
}

/// Output of a document run: the extracted text plus its analysis, ready to
/// be persisted by the caller.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub text: String,
    pub analysis: AnalysisResult,
}

#[derive(Clone)]
pub struct Pipeline {
    knowledge: Arc<dyn KnowledgeStore>,
    generator: Arc<dyn GenerationClient>,
}

impl Pipeline {
    pub fn new(knowledge: Arc<dyn KnowledgeStore>, generator: Arc<dyn GenerationClient>) -> Self {
        Self {
            knowledge,
            generator,
        }
    }

    /// Extracts the document text on the blocking pool, then runs `analyze`.
    pub async fn analyze_document(&self, document: Bytes) -> Result<DocumentAnalysis, PipelineError> {
        let text = tokio::task::spawn_blocking(move || extraction::extract_text(&document))
            .await
            .map_err(|e| ExtractionError::Malformed(format!("extraction task failed: {e}")))??;
        info!("Extracted {} chars from document", text.len());

        let analysis = self.analyze(&text).await?;
        Ok(DocumentAnalysis { text, analysis })
    }

    /// Classifies `subject_text` against the FAQ context.
    ///
    /// Fails with `EmptyContext` before any generation call when the
    /// knowledge base yields nothing.
    pub async fn analyze(&self, subject_text: &str) -> Result<AnalysisResult, PipelineError> {
        let knowledge = build_knowledge_context(self.knowledge.as_ref()).await;
        if knowledge.is_empty() {
            return Err(PipelineError::EmptyContext);
        }

        let prompt = PromptContext::new(subject_text, &knowledge).render();
        debug!("Analysis prompt assembled ({} chars)", prompt.len());

        let raw = self.generator.complete(&prompt).await?;
        debug!("Raw analysis output: {raw}");

        let analysis = parse_analysis(&raw)?;
        info!("Analysis complete: level={}", analysis.level);
        Ok(analysis)
    }

    /// Answers a free-form message. An empty knowledge context is acceptable
    /// here, and the reply is returned unparsed.
    pub async fn chat(&self, message: &str) -> Result<String, PipelineError> {
        let knowledge = build_knowledge_context(self.knowledge.as_ref()).await;
        let prompt = PromptContext::new(message, &knowledge).render();
        let reply = self.generator.complete(&prompt).await?;
        Ok(reply)
    }
}
