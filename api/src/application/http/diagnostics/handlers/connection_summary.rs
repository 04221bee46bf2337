use axum::extract::State;
use healthtrack_core::domain::diagnostics::{
    entities::ConnectionSummary, ports::DiagnosticsService,
};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/connection",
    tag = "diagnostics",
    summary = "Show the configured database connection",
    description = "The password is reported only as `Set (N chars)` or `NOT SET`.",
    responses(
        (status = 200, body = ConnectionSummary)
    )
)]
pub async fn connection_summary(State(state): State<AppState>) -> Response<ConnectionSummary> {
    Response::OK(state.service.connection_summary())
}
