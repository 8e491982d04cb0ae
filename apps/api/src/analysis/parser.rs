//! Structured Result Parser — decodes free-form model output into an `AnalysisResult`.
//!
//! Decoding rule, applied in order:
//! 1. After stripping code fences, a JSON object (or the first `{ ... }` span
//!    of the text) with `level`, `justification` and `suggestions` keys.
//! 2. Labeled lines: `level: ...`, `justification: ...`, `suggestions: ...`
//!    (case-insensitive, Portuguese aliases accepted, markdown bullets and bold
//!    tolerated). `justification` and `suggestions` run until the next label;
//!    `level` is read from its label line only. The first occurrence of a
//!    label wins.
//!
//! Any field that is absent or blank, or a level outside the known labels,
//! fails the whole parse.

use serde_json::Value;
use thiserror::Error;

use crate::llm_client::strip_json_fences;
use crate::models::analysis::{AnalysisResult, SuitabilityLevel};

#[derive(Debug, Error)]
#[error("could not decode analysis: {reason}")]
pub struct ParseError {
    pub reason: String,
    /// Unmodified model output, kept for diagnostics only.
    pub raw: String,
}

impl ParseError {
    fn new(reason: impl Into<String>, raw: &str) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Level,
    Justification,
    Suggestions,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Level => "level",
            Field::Justification => "justification",
            Field::Suggestions => "suggestions",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "level" | "nível" | "nivel" => Some(Field::Level),
            "justification" | "justificativa" => Some(Field::Justification),
            "suggestions" | "sugestões" | "sugestoes" => Some(Field::Suggestions),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Fields {
    level: Option<String>,
    justification: Option<String>,
    suggestions: Option<String>,
}

impl Fields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Level => &mut self.level,
            Field::Justification => &mut self.justification,
            Field::Suggestions => &mut self.suggestions,
        }
    }
}

pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, ParseError> {
    let text = strip_json_fences(raw);
    let fields = decode_json(text).unwrap_or_else(|| decode_labeled_lines(text));
    into_result(fields, raw)
}

fn into_result(fields: Fields, raw: &str) -> Result<AnalysisResult, ParseError> {
    let level = present(fields.level);
    let justification = present(fields.justification);
    let suggestions = present(fields.suggestions);

    let (Some(level), Some(justification), Some(suggestions)) =
        (&level, &justification, &suggestions)
    else {
        let missing: Vec<&str> = [
            (Field::Level, level.is_none()),
            (Field::Justification, justification.is_none()),
            (Field::Suggestions, suggestions.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(field, _)| field.name())
        .collect();
        return Err(ParseError::new(
            format!("missing field(s): {}", missing.join(", ")),
            raw,
        ));
    };

    let level = SuitabilityLevel::from_label(level)
        .ok_or_else(|| ParseError::new(format!("unrecognized level '{level}'"), raw))?;

    Ok(AnalysisResult {
        level,
        justification: justification.clone(),
        suggestions: suggestions.clone(),
    })
}

/// Trimmed value, or None when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn decode_json(text: &str) -> Option<Fields> {
    let object = serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
        .or_else(|| {
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&text[start..=end])
                .ok()
                .filter(Value::is_object)
        })?;

    let mut fields = Fields::default();
    let mut recognized = false;
    for (key, value) in object.as_object()? {
        if let Some(field) = Field::from_key(&key.to_lowercase()) {
            recognized = true;
            let slot = fields.slot(field);
            if slot.is_none() {
                *slot = json_text(value);
            }
        }
    }
    // An unrelated JSON snippet should not shadow labeled lines.
    recognized.then_some(fields)
}

/// Strings pass through; an array of strings is joined one per line.
fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            parts.map(|p| p.join("\n"))
        }
        _ => None,
    }
}

fn decode_labeled_lines(text: &str) -> Fields {
    let mut fields = Fields::default();
    // Field currently collecting continuation lines; None while skipping.
    let mut current: Option<Field> = None;

    for line in text.lines() {
        if let Some((field, value)) = match_label(line) {
            let slot = fields.slot(field);
            if slot.is_none() {
                *slot = Some(value.to_string());
                // The level is a single label; prose after it is not part of it.
                current = (field != Field::Level).then_some(field);
            } else {
                current = None;
            }
            continue;
        }

        if let Some(field) = current {
            if let Some(existing) = fields.slot(field) {
                if !existing.is_empty() {
                    existing.push('\n');
                }
                existing.push_str(line.trim());
            }
        }
    }

    fields
}

/// Recognizes `level: x`, `- **Level:** x`, `**justification**: x` and similar.
fn match_label(line: &str) -> Option<(Field, &str)> {
    let trimmed = line
        .trim_start()
        .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•' | '#' | '_') || c.is_whitespace());
    let (key, value) = trimmed.split_once(':')?;
    let key = key
        .trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '"'))
        .trim()
        .to_lowercase();
    let field = Field::from_key(&key)?;
    let value = value
        .trim_start_matches(|c: char| matches!(c, '*' | '_'))
        .trim();
    Some((field, value))
}
