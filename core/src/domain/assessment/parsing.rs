use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::assessment::{
    entities::{AnalysisReport, ClarifyingQuestion, QuestionSet},
    json_repair::parse_lenient,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("invalid response structure: missing questions array")]
    MissingQuestions,

    #[error("invalid question {index}: {reason}")]
    InvalidQuestion { index: usize, reason: &'static str },

    #[error("missing required keys: {0}")]
    MissingKeys(String),
}

const REPORT_KEYS: [&str; 6] = [
    "visualFeatures",
    "tcmPatterns",
    "holisticAnalysis",
    "dietarySuggestions",
    "lifestyleSuggestions",
    "importantNote",
];

fn parse_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    match parse_lenient(raw).map_err(|e| ParseError::InvalidJson(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::NotAnObject),
    }
}

pub fn parse_question_set(raw: &str) -> Result<QuestionSet, ParseError> {
    let object = parse_object(raw)?;

    let Some(Value::Array(items)) = object.get("questions") else {
        return Err(ParseError::MissingQuestions);
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_question(i + 1, item))
        .collect::<Result<Vec<_>, _>>()?;

    if questions.is_empty() {
        return Err(ParseError::MissingQuestions);
    }

    Ok(QuestionSet { questions })
}

fn parse_question(index: usize, item: &Value) -> Result<ClarifyingQuestion, ParseError> {
    let question_text = item
        .get("questionText")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ParseError::InvalidQuestion {
            index,
            reason: "missing or invalid questionText",
        })?;

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
        })
        .filter(|options| options.len() >= 2)
        .ok_or(ParseError::InvalidQuestion {
            index,
            reason: "missing or invalid options array",
        })?;

    let allow_multiple = item
        .get("allowMultiple")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(ClarifyingQuestion {
        question_text: question_text.to_string(),
        options,
        allow_multiple,
    })
}

pub fn parse_analysis_report(raw: &str) -> Result<AnalysisReport, ParseError> {
    let object = parse_object(raw)?;

    let missing: Vec<&str> = REPORT_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingKeys(missing.join(", ")));
    }

    Ok(AnalysisReport {
        visual_features: coerce_list(&object["visualFeatures"]),
        tcm_patterns: coerce_list(&object["tcmPatterns"]),
        holistic_analysis: coerce_text(&object["holisticAnalysis"]),
        dietary_suggestions: coerce_list(&object["dietarySuggestions"]),
        lifestyle_suggestions: coerce_list(&object["lifestyleSuggestions"]),
        important_note: coerce_text(&object["importantNote"]),
    })
}

/// Arrays keep their truthy entries; a lone scalar becomes a one-element list.
fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn coerce_text(value: &Value) -> String {
    scalar_to_string(value).unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}
