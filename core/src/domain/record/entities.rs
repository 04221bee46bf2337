use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    assessment::entities::{AnalysisReport, ClarifyingAnswers},
    common::generate_timestamp,
    intake::entities::IntakeForm,
};

/// One completed assessment as stored in the `health_records` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRecord {
    pub id: Uuid,
    pub device_id: Option<String>,
    pub height: f64,
    pub weight: f64,
    pub tongue_body_color: String,
    pub tongue_shape: String,
    pub tongue_coating_color: String,
    pub tongue_coating_thickness: String,
    pub mood: Option<String>,
    pub symptoms: Option<String>,
    pub medical_records: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = Object)]
    pub clarifying_answers: ClarifyingAnswers,
    pub analysis_result: AnalysisReport,
    pub is_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl HealthRecord {
    pub fn new(
        intake: &IntakeForm,
        clarifying_answers: ClarifyingAnswers,
        analysis_result: AnalysisReport,
        is_fallback: bool,
        device_id: Option<String>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            device_id,
            height: intake.height_cm,
            weight: intake.weight_kg,
            tongue_body_color: intake.tongue_body_color.label().to_string(),
            tongue_shape: intake.tongue_shape.label().to_string(),
            tongue_coating_color: intake.tongue_coating_color.label().to_string(),
            tongue_coating_thickness: intake.tongue_coating_thickness.label().to_string(),
            mood: intake.mood.clone(),
            symptoms: intake.symptoms.clone(),
            medical_records: intake.medical_records.clone(),
            image_url: intake.image_url.clone(),
            clarifying_answers,
            analysis_result,
            is_fallback,
            created_at: now,
        }
    }
}
