use abi::{Booking, Error};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Drop the time of day from anything that carries a calendar date.
///
/// No time-zone conversion happens: a `DateTime<Tz>` keeps the day it shows
/// in its own zone.
pub fn calendar_day(value: &impl Datelike) -> NaiveDate {
    // every Datelike value is itself a valid y/m/d
    NaiveDate::from_ymd_opt(value.year(), value.month(), value.day())
        .unwrap_or(NaiveDate::MIN)
}

/// Bookings whose stay covers `date`, i.e. `check_in <= date < check_out`.
///
/// Comparison is per calendar day. Input order is kept. A booking with
/// unparseable dates never matches and does not affect the others.
pub fn for_date(bookings: &[Booking], date: NaiveDate) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|booking| match booking.stay() {
            Ok(stay) => stay.contains(date),
            Err(e) => {
                debug!("skip booking {}: {}", booking.id, e);
                false
            }
        })
        .collect()
}

/// Number of nights the guest stays.
pub fn nights(booking: &Booking) -> Result<i64, Error> {
    booking.nights()
}
