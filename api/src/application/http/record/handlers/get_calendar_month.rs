use axum::{
    Extension,
    extract::{Query, State, rejection::QueryRejection},
};
use healthtrack_core::domain::record::{
    ports::RecordService,
    value_objects::{CalendarMonth, CalendarMonthInput},
};

use crate::application::{
    device_middleware::DeviceContext,
    http::{
        record::validators::{CalendarQuery, validated_query},
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "/calendar",
    tag = "record",
    summary = "Records of a month grouped by local day",
    description = "Days are computed in `utc_offset_minutes` (server default when omitted). Each day carries the record count and the newest record id.",
    params(
        CalendarQuery,
        ("x-device-id" = Option<String>, Header, description = "Device the records belong to")
    ),
    responses(
        (status = 200, body = CalendarMonth),
        (status = 400, description = "Invalid month or offset")
    )
)]
pub async fn get_calendar_month(
    State(state): State<AppState>,
    Extension(device): Extension<DeviceContext>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Result<Response<CalendarMonth>, ApiError> {
    let query = validated_query(query)?;

    let month = state
        .service
        .get_calendar_month(CalendarMonthInput {
            year: query.year,
            month: query.month,
            utc_offset_minutes: query
                .utc_offset_minutes
                .unwrap_or(state.args.calendar.utc_offset_minutes),
            device_id: device.device_id,
        })
        .await?;

    Ok(Response::OK(month))
}
