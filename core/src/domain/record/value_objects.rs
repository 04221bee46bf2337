use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Filter for record queries. `created_after` is inclusive and
/// `created_before` exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub device_id: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OffsetLimit {
    pub offset: i64,
    pub limit: i64,
}

impl Default for OffsetLimit {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl OffsetLimit {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.offset < 0 {
            return Err("offset must be >= 0".to_string());
        }
        if self.limit <= 0 || self.limit > MAX_PAGE_SIZE {
            return Err(format!("limit must be between 1 and {MAX_PAGE_SIZE}"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub offset: i64,
    pub limit: i64,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct ListRecordsInput {
    pub filter: RecordFilter,
    pub pagination: OffsetLimit,
}

#[derive(Debug, Clone)]
pub struct CalendarMonthInput {
    pub year: i32,
    pub month: u32,
    pub utc_offset_minutes: i32,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordsForDayInput {
    pub date: NaiveDate,
    pub utc_offset_minutes: i32,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub record_count: i64,
    pub latest_record_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub utc_offset_minutes: i32,
    pub days: Vec<CalendarDay>,
}
