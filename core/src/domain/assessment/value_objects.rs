use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    assessment::entities::{AnalysisReport, ClarifyingAnswers, ClarifyingQuestion},
    intake::entities::IntakeForm,
};

#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub intake: IntakeForm,
    /// Questions produced by the first phase, echoed back by the client so
    /// answers can be paired with their wording.
    pub questions: Option<Vec<ClarifyingQuestion>>,
    pub answers: ClarifyingAnswers,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionSetOutcome {
    pub questions: Vec<ClarifyingQuestion>,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub record_id: Option<Uuid>,
    pub fallback: bool,
}
