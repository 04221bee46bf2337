use chrono::Utc;

use crate::domain::record::entities::HealthRecord;
use crate::entity::health_records::{ActiveModel as HealthRecordActiveModel, Model as HealthRecordModel};
use sea_orm::ActiveValue::Set;

impl From<&HealthRecordModel> for HealthRecord {
    fn from(model: &HealthRecordModel) -> Self {
        Self {
            id: model.id,
            device_id: model.device_id.clone(),
            height: model.height,
            weight: model.weight,
            tongue_body_color: model.tongue_body_color.clone(),
            tongue_shape: model.tongue_shape.clone(),
            tongue_coating_color: model.tongue_coating_color.clone(),
            tongue_coating_thickness: model.tongue_coating_thickness.clone(),
            mood: model.mood.clone(),
            symptoms: model.symptoms.clone(),
            medical_records: model.medical_records.clone(),
            image_url: model.image_url.clone(),
            clarifying_answers: serde_json::from_value(model.clarifying_answers.clone())
                .unwrap_or_default(),
            analysis_result: serde_json::from_value(model.analysis_result.clone())
                .unwrap_or_default(),
            is_fallback: model.is_fallback,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<&HealthRecord> for HealthRecordActiveModel {
    fn from(record: &HealthRecord) -> Self {
        Self {
            id: Set(record.id),
            device_id: Set(record.device_id.clone()),
            height: Set(record.height),
            weight: Set(record.weight),
            tongue_body_color: Set(record.tongue_body_color.clone()),
            tongue_shape: Set(record.tongue_shape.clone()),
            tongue_coating_color: Set(record.tongue_coating_color.clone()),
            tongue_coating_thickness: Set(record.tongue_coating_thickness.clone()),
            mood: Set(record.mood.clone()),
            symptoms: Set(record.symptoms.clone()),
            medical_records: Set(record.medical_records.clone()),
            image_url: Set(record.image_url.clone()),
            clarifying_answers: Set(
                serde_json::to_value(&record.clarifying_answers).unwrap_or_default()
            ),
            analysis_result: Set(serde_json::to_value(&record.analysis_result).unwrap_or_default()),
            is_fallback: Set(record.is_fallback),
            created_at: Set(record.created_at.fixed_offset()),
        }
    }
}
