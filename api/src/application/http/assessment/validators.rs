use std::collections::BTreeMap;

use healthtrack_core::domain::{
    assessment::entities::{ClarifyingAnswer, ClarifyingAnswers, ClarifyingQuestion},
    intake::{
        entities::{MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_HEIGHT_CM, MIN_WEIGHT_KG},
        value_objects::RawIntake,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Questionnaire answers as the web client sends them.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    /// Height in centimetres
    #[validate(range(min = MIN_HEIGHT_CM, max = MAX_HEIGHT_CM))]
    pub height: f64,
    /// Weight in kilograms
    #[validate(range(min = MIN_WEIGHT_KG, max = MAX_WEIGHT_KG))]
    pub weight: f64,
    #[validate(length(min = 1, message = "tongue body color is required"))]
    pub tongue_body_color: String,
    #[validate(length(min = 1, message = "tongue shape is required"))]
    pub tongue_shape: String,
    #[validate(length(min = 1, message = "tongue coating color is required"))]
    pub tongue_coating_color: String,
    #[validate(length(min = 1, message = "tongue coating thickness is required"))]
    pub tongue_coating_thickness: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub mood: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub symptoms: Option<String>,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub medical_records: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
}

impl From<IntakeRequest> for RawIntake {
    fn from(request: IntakeRequest) -> Self {
        Self {
            height: request.height,
            weight: request.weight,
            tongue_body_color: request.tongue_body_color,
            tongue_shape: request.tongue_shape,
            tongue_coating_color: request.tongue_coating_color,
            tongue_coating_thickness: request.tongue_coating_thickness,
            mood: request.mood,
            symptoms: request.symptoms,
            medical_records: request.medical_records,
            image_url: request.image_url,
        }
    }
}

/// Intake plus the clarifying questions and the user's answers to them.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub intake: IntakeRequest,
    /// Questions returned by the questions endpoint, echoed back
    #[serde(default)]
    pub clarifying_questions: Option<Vec<ClarifyingQuestion>>,
    /// Answers keyed by zero-based question index; a string or a list of strings
    #[serde(default)]
    #[schema(value_type = Object)]
    pub ai_answers: BTreeMap<String, ClarifyingAnswer>,
}

impl AnalysisRequest {
    /// Answers whose key is not a question index are dropped.
    pub fn answers(&self) -> ClarifyingAnswers {
        self.ai_answers
            .iter()
            .filter_map(|(key, answer)| {
                key.trim()
                    .parse::<usize>()
                    .ok()
                    .map(|index| (index, answer.clone()))
            })
            .collect()
    }
}
