use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    record::{
        entities::HealthRecord,
        value_objects::{
            CalendarMonth, CalendarMonthInput, ListRecordsInput, OffsetLimit, Paginated,
            RecordFilter, RecordsForDayInput,
        },
    },
};

/// Repository trait for health record data access
#[cfg_attr(test, mockall::automock)]
pub trait RecordRepository: Send + Sync {
    fn create(
        &self,
        record: HealthRecord,
    ) -> impl Future<Output = Result<HealthRecord, CoreError>> + Send;

    fn get_by_id(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<Option<HealthRecord>, CoreError>> + Send;

    /// Records matching `filter`, newest first. `pagination` of `None`
    /// returns every match.
    fn list(
        &self,
        filter: RecordFilter,
        pagination: Option<OffsetLimit>,
    ) -> impl Future<Output = Result<Vec<HealthRecord>, CoreError>> + Send;

    fn count(&self, filter: RecordFilter) -> impl Future<Output = Result<i64, CoreError>> + Send;
}

/// Service trait for browsing stored records
pub trait RecordService: Send + Sync {
    fn list_records(
        &self,
        input: ListRecordsInput,
    ) -> impl Future<Output = Result<Paginated<HealthRecord>, CoreError>> + Send;

    fn get_record(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<HealthRecord, CoreError>> + Send;

    fn get_calendar_month(
        &self,
        input: CalendarMonthInput,
    ) -> impl Future<Output = Result<CalendarMonth, CoreError>> + Send;

    fn get_records_for_day(
        &self,
        input: RecordsForDayInput,
    ) -> impl Future<Output = Result<Vec<HealthRecord>, CoreError>> + Send;
}
