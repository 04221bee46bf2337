use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClarifyingQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionSet {
    pub questions: Vec<ClarifyingQuestion>,
}

/// Answer to one clarifying question: a single option, or several when the
/// question allows multiple selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ClarifyingAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl ClarifyingAnswer {
    pub fn is_empty(&self) -> bool {
        match self {
            ClarifyingAnswer::Single(value) => value.trim().is_empty(),
            ClarifyingAnswer::Multiple(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ClarifyingAnswer::Single(value) => value.trim().to_string(),
            ClarifyingAnswer::Multiple(values) => values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join("、"),
        }
    }
}

/// Answers keyed by the zero-based index of the question they respond to.
pub type ClarifyingAnswers = BTreeMap<usize, ClarifyingAnswer>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub visual_features: Vec<String>,
    pub tcm_patterns: Vec<String>,
    pub holistic_analysis: String,
    pub dietary_suggestions: Vec<String>,
    pub lifestyle_suggestions: Vec<String>,
    pub important_note: String,
}

/// Image bytes sent inline alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}
