use healthtrack_core::domain::health::entities::HealthState;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    pub status: HealthState,
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = LivenessResponse)
    )
)]
pub async fn live() -> Response<LivenessResponse> {
    Response::OK(LivenessResponse {
        status: HealthState::Up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;

    #[tokio::test]
    async fn live_reports_up() {
        let server = TestServer::new(Router::new().route("/health/live", get(live))).unwrap();

        let response = server.get("/health/live").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({"data": {"status": "up"}}));
    }
}
