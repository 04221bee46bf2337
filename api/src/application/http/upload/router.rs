use axum::{Router, extract::DefaultBodyLimit, routing::post};
use healthtrack_core::domain::storage::value_objects::MAX_IMAGE_BYTES;
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::upload_image::{__path_upload_image, upload_image};

/// Room for the multipart framing around a maximum-size image.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(upload_image))]
pub struct UploadApiDoc;

pub fn upload_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/uploads"), post(upload_image))
        .layer(DefaultBodyLimit::max(
            MAX_IMAGE_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
}
