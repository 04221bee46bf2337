use axum::{Extension, extract::State};
use healthtrack_core::domain::record::{
    entities::HealthRecord,
    ports::RecordService,
    value_objects::{ListRecordsInput, OffsetLimit, Paginated},
};

use crate::application::{
    device_middleware::DeviceContext,
    http::{
        query_extractor::QueryParamsExtractor,
        record::validators::record_filter,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "record",
    summary = "List health records",
    description = "Newest first. Supports `filter[created_at][gte|gt|lt|lte]` with RFC 3339 timestamps plus `offset` and `limit` (default 20, max 100). Scoped to the `X-Device-Id` device when the header is present.",
    params(
        ("x-device-id" = Option<String>, Header, description = "Device the records belong to"),
        ("offset" = Option<i64>, Query, description = "Records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, body = Paginated<HealthRecord>),
        (status = 400, description = "Invalid filter or pagination")
    )
)]
pub async fn list_records(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<Paginated<HealthRecord>>, ApiError> {
    let filter = record_filter(&params.filters, device.device_id)?;

    let page = state
        .service
        .list_records(ListRecordsInput {
            filter,
            pagination: OffsetLimit::new(params.pagination.offset, params.pagination.limit),
        })
        .await?;

    Ok(Response::OK(page))
}
