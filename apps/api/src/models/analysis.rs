use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Suitability label assigned to a resume. Serialized with the labels the
/// prompt asks the model to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitabilityLevel {
    #[serde(rename = "Aprovado")]
    Approved,
    #[serde(rename = "A ser revisado")]
    NeedsReview,
    #[serde(rename = "Rejeitado")]
    Rejected,
}

impl SuitabilityLevel {
    pub const ALL: [SuitabilityLevel; 3] = [
        SuitabilityLevel::Approved,
        SuitabilityLevel::NeedsReview,
        SuitabilityLevel::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLevel::Approved => "Aprovado",
            SuitabilityLevel::NeedsReview => "A ser revisado",
            SuitabilityLevel::Rejected => "Rejeitado",
        }
    }

    /// Case-insensitive lookup; surrounding whitespace, quotes and a trailing
    /// period are ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '*'))
            .trim_end_matches('.')
            .trim()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().to_lowercase() == normalized)
    }
}

impl fmt::Display for SuitabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured outcome of one resume evaluation.
///
/// Only produced by `analysis::parser::parse_analysis` (or rehydrated from a
/// persisted record); a partially decoded response never becomes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub level: SuitabilityLevel,
    pub justification: String,
    pub suggestions: String,
}

/// One processed resume as stored: extracted text plus its analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub text: String,
    pub analysis: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(text: String, analysis: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            analysis,
            created_at: Utc::now(),
        }
    }
}

/// Flat row shape of `analysis_records`.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRecordRow {
    pub id: Uuid,
    pub text: String,
    pub level: String,
    pub justification: String,
    pub suggestions: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AnalysisRecordRow> for AnalysisRecord {
    type Error = String;

    fn try_from(row: AnalysisRecordRow) -> Result<Self, Self::Error> {
        let level = SuitabilityLevel::from_label(&row.level)
            .ok_or_else(|| format!("record {} has unknown level '{}'", row.id, row.level))?;
        Ok(AnalysisRecord {
            id: row.id,
            text: row.text,
            analysis: AnalysisResult {
                level,
                justification: row.justification,
                suggestions: row.suggestions,
            },
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&SuitabilityLevel::NeedsReview).unwrap();
        assert_eq!(json, r#""A ser revisado""#);
    }

    #[test]
    fn test_from_label_is_case_insensitive() {
        assert_eq!(
            SuitabilityLevel::from_label("  aprovado. "),
            Some(SuitabilityLevel::Approved)
        );
        assert_eq!(
            SuitabilityLevel::from_label("\"REJEITADO\""),
            Some(SuitabilityLevel::Rejected)
        );
        assert_eq!(SuitabilityLevel::from_label("maybe"), None);
    }

    #[test]
    fn test_analysis_result_has_exactly_three_fields() {
        let result = AnalysisResult {
            level: SuitabilityLevel::Approved,
            justification: "Strong fit".to_string(),
            suggestions: "None".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["level"], "Aprovado");
    }

    #[test]
    fn test_row_with_unknown_level_is_rejected() {
        let row = AnalysisRecordRow {
            id: Uuid::new_v4(),
            text: "text".to_string(),
            level: "Excelente".to_string(),
            justification: "j".to_string(),
            suggestions: "s".to_string(),
            created_at: Utc::now(),
        };
        assert!(AnalysisRecord::try_from(row).is_err());
    }
}
