use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    connection_summary::{__path_connection_summary, connection_summary},
    database_probe::{__path_database_probe, database_probe},
    network_probe::{__path_network_probe, network_probe},
};

#[derive(OpenApi)]
#[openapi(paths(database_probe, network_probe, connection_summary))]
pub struct DiagnosticsApiDoc;

pub fn diagnostics_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{root_path}/diagnostics/database"),
            get(database_probe),
        )
        .route(
            &format!("{root_path}/diagnostics/network"),
            get(network_probe),
        )
        .route(
            &format!("{root_path}/diagnostics/connection"),
            get(connection_summary),
        )
}
