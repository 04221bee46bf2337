use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use healthtrack_core::domain::storage::{
    entities::UploadedImage,
    ports::ImageUploadService,
    value_objects::{MAX_IMAGE_BYTES, UploadImageInput},
};
use tracing::{error, info};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

fn multipart_error(e: MultipartError) -> ApiError {
    error!("Failed to read multipart body: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge(format!(
            "File too large. Max size is {} bytes",
            MAX_IMAGE_BYTES
        ));
    }
    ApiError::BadRequest(format!("Failed to read file: {}", e.body_text()))
}

#[utoipa::path(
    post,
    path = "",
    tag = "upload",
    summary = "Upload a tongue photo",
    description = "Multipart form with a single `file` field holding an image of at most 10 MiB. The returned `url` can be sent as `imageUrl` in the assessment requests.",
    request_body(content_type = "multipart/form-data", description = "Form with a `file` field"),
    responses(
        (status = 201, description = "Image stored", body = UploadedImage),
        (status = 400, description = "Missing, empty or non-image file"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<UploadedImage>, ApiError> {
    let input = read_file_field(multipart).await?;
    let uploaded = state.service.upload_image(input).await?;

    info!(
        object_key = %uploaded.object_key,
        size_bytes = uploaded.size_bytes,
        "Tongue image uploaded"
    );

    Ok(Response::Created(uploaded))
}

/// The `file` field of the form; other fields are skipped.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadImageInput, ApiError> {
    let mut input: Option<UploadImageInput> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field.bytes().await.map_err(multipart_error)?;

        input = Some(UploadImageInput {
            filename,
            content_type,
            data,
        });
    }

    input.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::DefaultBodyLimit, routing::post};
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use serde_json::{Value, json};

    const TEST_BODY_LIMIT: usize = 4 * 1024;

    async fn describe_upload(multipart: Multipart) -> Result<Response<Value>, ApiError> {
        let input = read_file_field(multipart).await?;
        Ok(Response::OK(json!({
            "filename": input.filename,
            "content_type": input.content_type,
            "size": input.data.len(),
        })))
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/uploads", post(describe_upload))
            .layer(DefaultBodyLimit::max(TEST_BODY_LIMIT));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn reads_file_field_and_skips_others() {
        let form = MultipartForm::new()
            .add_text("note", "morning photo")
            .add_part(
                "file",
                Part::bytes(vec![7u8; 512])
                    .file_name("tongue.png")
                    .mime_type("image/png"),
            );

        let response = server().post("/uploads").multipart(form).await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "data": {"filename": "tongue.png", "content_type": "image/png", "size": 512}
        }));
    }

    #[tokio::test]
    async fn missing_file_field_is_bad_request() {
        let form = MultipartForm::new().add_text("note", "no photo");

        let response = server().post("/uploads").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "E_BAD_REQUEST");
        assert_eq!(body["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn body_over_limit_is_payload_too_large() {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![0u8; TEST_BODY_LIMIT * 4])
                .file_name("tongue.jpg")
                .mime_type("image/jpeg"),
        );

        let response = server().post("/uploads").multipart(form).await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        let body: Value = response.json();
        assert_eq!(body["code"], "E_PAYLOAD_TOO_LARGE");
    }
}
