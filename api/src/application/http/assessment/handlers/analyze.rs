use axum::{Extension, extract::State};
use healthtrack_core::domain::{
    assessment::{
        ports::AssessmentService,
        value_objects::{AnalysisOutcome, AnalyzeInput},
    },
    intake::entities::IntakeForm,
};

use crate::application::{
    device_middleware::DeviceContext,
    http::{
        assessment::validators::AnalysisRequest,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/analysis",
    tag = "assessment",
    summary = "Run the final analysis",
    description = "Second phase. Produces the TCM report and stores a health record. `record_id` is null when the record could not be saved.",
    request_body = AnalysisRequest,
    params(
        ("x-device-id" = Option<String>, Header, description = "Device the record belongs to")
    ),
    responses(
        (status = 200, body = AnalysisOutcome),
        (status = 400, description = "Invalid intake"),
        (status = 502, description = "Model provider unavailable")
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    ValidateJson(payload): ValidateJson<AnalysisRequest>,
) -> Result<Response<AnalysisOutcome>, ApiError> {
    let answers = payload.answers();
    let intake = IntakeForm::new(payload.intake.into())?;

    let outcome = state
        .service
        .analyze(AnalyzeInput {
            intake,
            questions: payload.clarifying_questions,
            answers,
            device_id: device.device_id,
        })
        .await?;

    Ok(Response::OK(outcome))
}
