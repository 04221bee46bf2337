//! Local-calendar arithmetic for browsing records by month and day.
//!
//! Records are stored with UTC timestamps. Clients pass the UTC offset they
//! want dates computed in, so a record made at 23:30 local time lands on the
//! local day rather than the UTC one.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, FixedOffset, Months, NaiveDate, TimeZone, Utc};

use crate::domain::{
    common::entities::app_errors::CoreError,
    record::{entities::HealthRecord, value_objects::CalendarDay},
};

pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 480;
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

pub fn fixed_offset(utc_offset_minutes: i32) -> Result<FixedOffset, CoreError> {
    if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&utc_offset_minutes) {
        return Err(CoreError::Invalid(format!(
            "utc_offset_minutes must be between -{MAX_UTC_OFFSET_MINUTES} and {MAX_UTC_OFFSET_MINUTES}"
        )));
    }

    FixedOffset::east_opt(utc_offset_minutes * 60)
        .ok_or_else(|| CoreError::Invalid("invalid utc offset".to_string()))
}

fn local_midnight_utc(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>, CoreError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CoreError::Invalid(format!("invalid date {date}")))?;

    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CoreError::Invalid(format!("invalid local time for {date}")))
}

/// UTC range `[start, end)` covering the given local month.
pub fn month_range(
    year: i32,
    month: u32,
    utc_offset_minutes: i32,
) -> Result<(DateTime<Utc>, DateTime<Utc>), CoreError> {
    let offset = fixed_offset(utc_offset_minutes)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Invalid(format!("invalid month {year}-{month}")))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CoreError::Invalid(format!("invalid month {year}-{month}")))?;

    Ok((
        local_midnight_utc(first, offset)?,
        local_midnight_utc(next, offset)?,
    ))
}

/// UTC range `[start, end)` covering the given local day.
pub fn day_range(
    date: NaiveDate,
    utc_offset_minutes: i32,
) -> Result<(DateTime<Utc>, DateTime<Utc>), CoreError> {
    let offset = fixed_offset(utc_offset_minutes)?;
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CoreError::Invalid(format!("invalid date {date}")))?;

    Ok((
        local_midnight_utc(date, offset)?,
        local_midnight_utc(next, offset)?,
    ))
}

pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Groups records by local date, ascending. Each day points at its most
/// recent record.
pub fn group_by_local_date(records: &[HealthRecord], offset: FixedOffset) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, (i64, &HealthRecord)> = BTreeMap::new();

    for record in records {
        let date = local_date(record.created_at, offset);
        let entry = days.entry(date).or_insert((0, record));
        entry.0 += 1;
        if record.created_at > entry.1.created_at {
            entry.1 = record;
        }
    }

    days.into_iter()
        .map(|(date, (record_count, latest))| CalendarDay {
            date,
            record_count,
            latest_record_id: latest.id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::record_at;

    #[test]
    fn month_range_shifts_by_offset() {
        let (start, end) = month_range(2024, 3, 480).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-02-29T16:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-03-31T16:00:00+00:00");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (_, end) = month_range(2023, 12, 0).unwrap();
        assert_eq!(end.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_invalid_month_and_offset() {
        assert!(matches!(month_range(2024, 13, 0), Err(CoreError::Invalid(_))));
        assert!(matches!(month_range(2024, 1, 900), Err(CoreError::Invalid(_))));
        assert!(matches!(fixed_offset(i32::MIN), Err(CoreError::Invalid(_))));
        assert!(matches!(fixed_offset(i32::MAX), Err(CoreError::Invalid(_))));
        assert!(fixed_offset(-MAX_UTC_OFFSET_MINUTES).is_ok());
    }

    #[test]
    fn day_range_for_negative_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let (start, end) = day_range(date, -300).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-05-10T05:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-05-11T05:00:00+00:00");
    }

    #[test]
    fn groups_late_utc_records_onto_next_local_day() {
        let late = record_at("2024-05-10T17:30:00Z", None);
        let later = record_at("2024-05-10T18:00:00Z", None);
        let morning = record_at("2024-05-10T01:00:00Z", None);
        let records = vec![later.clone(), late, morning.clone()];

        let days = group_by_local_date(&records, fixed_offset(480).unwrap());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(days[0].record_count, 1);
        assert_eq!(days[0].latest_record_id, morning.id);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
        assert_eq!(days[1].record_count, 2);
        assert_eq!(days[1].latest_record_id, later.id);
    }
}
