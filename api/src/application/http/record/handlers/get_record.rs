use axum::extract::{Path, State};
use healthtrack_core::domain::record::{entities::HealthRecord, ports::RecordService};
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{record_id}",
    tag = "record",
    summary = "Get a health record",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, body = HealthRecord),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_record(
    Path(record_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<HealthRecord>, ApiError> {
    let record = state.service.get_record(record_id).await?;

    Ok(Response::OK(record))
}
