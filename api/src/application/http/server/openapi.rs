use utoipa::OpenApi;

use crate::application::http::{
    assessment::{
        handlers::get_questionnaire::__path_get_questionnaire, router::AssessmentApiDoc,
    },
    diagnostics::router::DiagnosticsApiDoc,
    health::router::HealthApiDoc,
    record::router::RecordApiDoc,
    server::config::__path_get_config,
    upload::router::UploadApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HealthTrack API",
        description = "Tongue diagnosis questionnaire, AI analysis and health records"
    ),
    paths(get_config, get_questionnaire),
    nest(
        (path = "/assessments", api = AssessmentApiDoc),
        (path = "/uploads", api = UploadApiDoc),
        (path = "/records", api = RecordApiDoc),
        (path = "/health", api = HealthApiDoc),
        (path = "/diagnostics", api = DiagnosticsApiDoc),
    )
)]
pub struct ApiDoc;
