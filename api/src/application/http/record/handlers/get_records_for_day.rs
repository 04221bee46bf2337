use axum::{
    Extension,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use healthtrack_core::domain::record::{
    entities::HealthRecord, ports::RecordService, value_objects::RecordsForDayInput,
};

use crate::application::{
    device_middleware::DeviceContext,
    http::{
        record::validators::{DayQuery, parse_date, validated_query},
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/days/{date}",
    tag = "record",
    summary = "Records of one local day",
    description = "Newest first; the first entry is the one the calendar detail view shows.",
    params(
        ("date" = String, Path, description = "Local date as YYYY-MM-DD"),
        DayQuery,
        ("x-device-id" = Option<String>, Header, description = "Device the records belong to")
    ),
    responses(
        (status = 200, body = Vec<HealthRecord>),
        (status = 400, description = "Invalid date or offset")
    )
)]
pub async fn get_records_for_day(
    Path(date): Path<String>,
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Response<Vec<HealthRecord>>, ApiError> {
    let date = parse_date(&date)?;
    let query = validated_query(query)?;

    let records = state
        .service
        .get_records_for_day(RecordsForDayInput {
            date,
            utc_offset_minutes: query
                .utc_offset_minutes
                .unwrap_or(state.args.calendar.utc_offset_minutes),
            device_id: device.device_id,
        })
        .await?;

    Ok(Response::OK(records))
}
