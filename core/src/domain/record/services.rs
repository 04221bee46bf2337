use uuid::Uuid;

use crate::domain::{
    assessment::ports::{ImageFetcher, LLMClient},
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::ports::DiagnosticsRepository,
    health::ports::HealthCheckRepository,
    record::{
        calendar::{day_range, fixed_offset, group_by_local_date, month_range},
        entities::HealthRecord,
        ports::{RecordRepository, RecordService},
        value_objects::{
            CalendarMonth, CalendarMonthInput, ListRecordsInput, Paginated, RecordFilter,
            RecordsForDayInput,
        },
    },
    storage::ports::ObjectStoragePort,
};

impl<RR, LLM, IF, OS, HC, DG> RecordService for Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    async fn list_records(
        &self,
        input: ListRecordsInput,
    ) -> Result<Paginated<HealthRecord>, CoreError> {
        input.pagination.validate().map_err(CoreError::Invalid)?;

        if let (Some(after), Some(before)) = (input.filter.created_after, input.filter.created_before)
        {
            if after >= before {
                return Err(CoreError::Invalid(
                    "created_after must be earlier than created_before".to_string(),
                ));
            }
        }

        let items = self
            .record_repository
            .list(input.filter.clone(), Some(input.pagination))
            .await?;
        let count = self.record_repository.count(input.filter).await?;

        Ok(Paginated {
            items,
            offset: input.pagination.offset,
            limit: input.pagination.limit,
            count,
        })
    }

    async fn get_record(&self, record_id: Uuid) -> Result<HealthRecord, CoreError> {
        self.record_repository
            .get_by_id(record_id)
            .await?
            .ok_or(CoreError::NotFound)
    }

    async fn get_calendar_month(
        &self,
        input: CalendarMonthInput,
    ) -> Result<CalendarMonth, CoreError> {
        let offset = fixed_offset(input.utc_offset_minutes)?;
        let (start, end) = month_range(input.year, input.month, input.utc_offset_minutes)?;

        let records = self
            .record_repository
            .list(
                RecordFilter {
                    device_id: input.device_id,
                    created_after: Some(start),
                    created_before: Some(end),
                },
                None,
            )
            .await?;

        Ok(CalendarMonth {
            year: input.year,
            month: input.month,
            utc_offset_minutes: input.utc_offset_minutes,
            days: group_by_local_date(&records, offset),
        })
    }

    async fn get_records_for_day(
        &self,
        input: RecordsForDayInput,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        let (start, end) = day_range(input.date, input.utc_offset_minutes)?;

        self.record_repository
            .list(
                RecordFilter {
                    device_id: input.device_id,
                    created_after: Some(start),
                    created_before: Some(end),
                },
                None,
            )
            .await
    }
}
