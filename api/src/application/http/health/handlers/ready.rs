use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use healthtrack_core::domain::health::{
    entities::{DatabaseHealthStatus, HealthState},
    ports::HealthCheckService,
};

use crate::application::http::server::{
    api_entities::{
        api_error::ApiError,
        response::{Envelope, Response},
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Runs `SELECT 1` against the database and reports its latency.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, description = "Database unreachable", body = DatabaseHealthStatus)
    )
)]
pub async fn ready(State(state): State<AppState>) -> Result<AxumResponse, ApiError> {
    let status = state.service.readiness().await?;

    Ok(readiness_response(status))
}

/// 200 with the status when the database is up, 503 with the same body otherwise.
fn readiness_response(status: DatabaseHealthStatus) -> AxumResponse {
    if status.status == HealthState::Down {
        tracing::warn!("Readiness check failed: database is down");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Envelope { data: status }),
        )
            .into_response();
    }

    Response::OK(status).into_response()
}
