use axum::extract::State;
use healthtrack_core::domain::{
    assessment::{ports::AssessmentService, value_objects::QuestionSetOutcome},
    intake::entities::IntakeForm,
};

use crate::application::http::{
    assessment::validators::IntakeRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/questions",
    tag = "assessment",
    summary = "Generate clarifying questions",
    description = "First phase. Returns three follow-up questions for the intake; `fallback` is true when the model output was unusable and a fixed set was returned instead.",
    request_body = IntakeRequest,
    responses(
        (status = 200, body = QuestionSetOutcome),
        (status = 400, description = "Invalid intake"),
        (status = 502, description = "Model provider unavailable")
    )
)]
pub async fn generate_questions(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<IntakeRequest>,
) -> Result<Response<QuestionSetOutcome>, ApiError> {
    let intake = IntakeForm::new(payload.into())?;
    let outcome = state.service.generate_questions(intake).await?;

    Ok(Response::OK(outcome))
}
