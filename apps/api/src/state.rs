use std::sync::Arc;

use crate::analysis::pipeline::Pipeline;
use crate::config::Config;
use crate::store::{KnowledgeStore, RecordStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub knowledge: Arc<dyn KnowledgeStore>,
    pub records: Arc<dyn RecordStore>,
    pub pipeline: Pipeline,
    pub config: Config,
}
