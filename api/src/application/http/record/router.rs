use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use crate::application::{
    device_middleware::device_middleware, http::server::app_state::AppState,
};

use super::handlers::{
    get_calendar_month::{__path_get_calendar_month, get_calendar_month},
    get_record::{__path_get_record, get_record},
    get_records_for_day::{__path_get_records_for_day, get_records_for_day},
    list_records::{__path_list_records, list_records},
};

#[derive(OpenApi)]
#[openapi(paths(list_records, get_calendar_month, get_records_for_day, get_record))]
pub struct RecordApiDoc;

pub fn record_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{root_path}/records"), get(list_records))
        .route(
            &format!("{root_path}/records/calendar"),
            get(get_calendar_month),
        )
        .route(
            &format!("{root_path}/records/days/{{date}}"),
            get(get_records_for_day),
        )
        .route(
            &format!("{root_path}/records/{{record_id}}"),
            get(get_record),
        )
        .layer(middleware::from_fn(device_middleware))
}
