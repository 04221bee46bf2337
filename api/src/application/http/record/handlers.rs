pub mod get_calendar_month;
pub mod get_record;
pub mod get_records_for_day;
pub mod list_records;
