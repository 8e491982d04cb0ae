//! Knowledge Context Builder — renders a bounded FAQ sample for the prompt.

use tracing::{debug, warn};

use crate::models::knowledge::KnowledgeEntry;
use crate::store::KnowledgeStore;

pub mod handlers;

/// Maximum number of FAQ entries embedded in a prompt.
pub const CONTEXT_ENTRY_LIMIT: usize = 10;

/// Loads up to `CONTEXT_ENTRY_LIMIT` entries and renders them as `Q:`/`A:` lines.
///
/// Never fails: a store error degrades to an empty context. Whether an empty
/// context is acceptable is the caller's decision.
pub async fn build_knowledge_context(store: &dyn KnowledgeStore) -> String {
    let entries = match store.list_entries(Some(CONTEXT_ENTRY_LIMIT)).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Knowledge store unavailable, continuing with empty context: {e}");
            return String::new();
        }
    };

    let context = render_entries(&entries);
    debug!(
        "Knowledge context built from {} entries ({} chars)",
        entries.len().min(CONTEXT_ENTRY_LIMIT),
        context.len()
    );
    context
}

/// Pure rendering step: `Q: <question>\nA: <answer>` per entry, joined by newlines.
pub fn render_entries(entries: &[KnowledgeEntry]) -> String {
    entries
        .iter()
        .take(CONTEXT_ENTRY_LIMIT)
        .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n")
}
