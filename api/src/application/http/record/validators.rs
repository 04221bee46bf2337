use axum::extract::{Query, rejection::QueryRejection};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use healthtrack_core::domain::record::value_objects::RecordFilter;
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::IntoParams;
use validator::Validate;

use crate::application::http::{
    query_params::{FilterCondition, FilterOperator},
    server::api_entities::api_error::ApiError,
};

/// Smallest step Postgres timestamps can distinguish.
fn timestamp_resolution() -> Duration {
    Duration::microseconds(1)
}

#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    /// Minutes east of UTC; the server default applies when omitted
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// Minutes east of UTC; the server default applies when omitted
    pub utc_offset_minutes: Option<i32>,
}

/// Query string extraction followed by `validator` rules.
pub fn validated_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let Query(value) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    value
        .validate()
        .map_err(|errors| ApiError::BadRequest(errors.to_string()))?;
    Ok(value)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("date must be YYYY-MM-DD, got {raw:?}")))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| ApiError::BadRequest(format!("created_at must be RFC 3339, got {raw:?}")))
}

/// Translates `filter[created_at][op]` conditions into a record filter.
/// The device scope comes from the request header, never from a filter.
pub fn record_filter(
    filters: &[FilterCondition],
    device_id: Option<String>,
) -> Result<RecordFilter, ApiError> {
    let mut filter = RecordFilter {
        device_id,
        ..Default::default()
    };

    for condition in filters {
        if condition.field != "created_at" {
            return Err(ApiError::BadRequest(format!(
                "unsupported filter field {:?}",
                condition.field
            )));
        }

        let ts = parse_timestamp(&condition.value)?;
        match condition.operator {
            FilterOperator::Gte => filter.created_after = Some(ts),
            FilterOperator::Gt => filter.created_after = Some(ts + timestamp_resolution()),
            FilterOperator::Lt => filter.created_before = Some(ts),
            FilterOperator::Lte => filter.created_before = Some(ts + timestamp_resolution()),
            FilterOperator::Eq => {
                return Err(ApiError::BadRequest(
                    "created_at supports gt, gte, lt and lte".to_string(),
                ));
            }
        }
    }

    Ok(filter)
}
