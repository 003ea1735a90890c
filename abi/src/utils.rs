use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};

use crate::Error;

/// Canonical calendar-day layout. Zero padded, so lexical order is date order.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse the calendar day out of a `YYYY-MM-DD` date or a timestamp.
///
/// Timestamps keep the day as written in their own offset, no conversion to
/// UTC or local time happens. `2024-03-10T23:30:00-07:00` is March 10th.
pub fn parse_calendar_day(s: &str) -> Result<NaiveDate, Error> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
        return Ok(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_str(s, OFFSET_TIMESTAMP_FORMAT) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, NAIVE_TIMESTAMP_FORMAT) {
        return Ok(ts.date());
    }
    Err(Error::InvalidDate(s.to_string()))
}

/// Render a day in the canonical `YYYY-MM-DD` form.
pub fn canonical_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// First and last day (both inclusive) of a month. `month` is 1-based.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), Error> {
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidMonth { year, month })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(Error::InvalidMonth { year, month })?;
    Ok((first, last))
}
