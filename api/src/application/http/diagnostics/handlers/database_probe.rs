use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use healthtrack_core::domain::diagnostics::{
    entities::DatabaseProbeReport, ports::DiagnosticsService,
};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Envelope},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/database",
    tag = "diagnostics",
    summary = "Run database probe queries",
    description = "Runs a basic select, a server time query and a database/user query, each timed. Succeeds when at least one of them passes.",
    responses(
        (status = 200, body = DatabaseProbeReport),
        (status = 500, description = "Every probe failed", body = DatabaseProbeReport)
    )
)]
pub async fn database_probe(State(state): State<AppState>) -> Result<AxumResponse, ApiError> {
    let report = state.service.database_probe().await?;

    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(Envelope { data: report })).into_response())
}
