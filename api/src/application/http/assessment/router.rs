use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::application::{
    device_middleware::device_middleware, http::server::app_state::AppState,
};

use super::handlers::{
    analyze::{__path_analyze, analyze},
    generate_questions::{__path_generate_questions, generate_questions},
    get_questionnaire::get_questionnaire,
};

#[derive(OpenApi)]
#[openapi(paths(generate_questions, analyze))]
pub struct AssessmentApiDoc;

pub fn assessment_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/questionnaire"), get(get_questionnaire))
        .route(
            &format!("{root_path}/assessments/questions"),
            post(generate_questions),
        )
        .route(&format!("{root_path}/assessments/analysis"), post(analyze))
        .layer(middleware::from_fn(device_middleware))
}
