use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use healthtrack_core::domain::diagnostics::{
    entities::NetworkProbeResult, ports::DiagnosticsService,
};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Envelope},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/network",
    tag = "diagnostics",
    summary = "Check TCP reachability of the database",
    responses(
        (status = 200, body = NetworkProbeResult),
        (status = 500, description = "Connection failed or timed out", body = NetworkProbeResult)
    )
)]
pub async fn network_probe(State(state): State<AppState>) -> Result<AxumResponse, ApiError> {
    let result = state.service.network_probe().await?;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(Envelope { data: result })).into_response())
}
