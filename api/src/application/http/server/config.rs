use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    application::http::server::{api_entities::response::Response, app_state::AppState},
    args::Environment,
};

/// Settings a client needs to talk to this server. No secrets.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicConfig {
    #[schema(value_type = String)]
    pub environment: Environment,
    pub root_path: String,
    pub llm_model: String,
    pub default_utc_offset_minutes: i32,
    pub max_upload_bytes: usize,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get public server configuration",
    responses(
        (status = 200, body = PublicConfig)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Response<PublicConfig> {
    Response::OK(PublicConfig {
        environment: state.args.env,
        root_path: state.args.server.root_path.clone(),
        llm_model: state.args.llm.gemini_model.clone(),
        default_utc_offset_minutes: state.args.calendar.utc_offset_minutes,
        max_upload_bytes: healthtrack_core::domain::storage::MAX_IMAGE_BYTES,
    })
}
