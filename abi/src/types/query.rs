use chrono::{Datelike, NaiveDate};
use derive_builder::Builder;

use crate::{canonical_day, month_bounds, Booking, BookingStatus, Error};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Page size used when a whole calendar month is fetched at once.
pub const MONTH_FETCH_LIMIT: u32 = 1000;

/// Filter for `GET /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct BookingQuery {
    #[builder(setter(into, strip_option), default)]
    pub property_id: Option<String>,
    #[builder(setter(strip_option), default)]
    pub status: Option<BookingStatus>,
    #[builder(setter(into, strip_option), default)]
    pub start_date: Option<NaiveDate>,
    #[builder(setter(into, strip_option), default)]
    pub end_date: Option<NaiveDate>,
    #[builder(setter(into), default = "DEFAULT_PAGE_SIZE")]
    pub limit: u32,
    #[builder(setter(into), default)]
    pub offset: u32,
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            property_id: None,
            status: None,
            start_date: None,
            end_date: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl BookingQuery {
    /// Everything a property has between the first and last day of a month.
    /// `month` is 1-based.
    pub fn for_month(property_id: impl Into<String>, year: i32, month: u32) -> Result<Self, Error> {
        let (first, last) = month_bounds(year, month)?;
        Ok(Self {
            property_id: Some(property_id.into()),
            start_date: Some(first),
            end_date: Some(last),
            limit: MONTH_FETCH_LIMIT,
            ..Default::default()
        })
    }

    /// Month window around `day`.
    pub fn for_month_of(property_id: impl Into<String>, day: NaiveDate) -> Result<Self, Error> {
        Self::for_month(property_id, day.year(), day.month())
    }

    /// Query-string pairs in the order the backend documents them. Unset
    /// filters and zero limit/offset are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(property_id) = &self.property_id {
            pairs.push(("propertyId", property_id.clone()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", canonical_day(start)));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", canonical_day(end)));
        }
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        if self.offset > 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        pairs
    }

    /// Property and status filters only; the date window is left to the
    /// calendar, which matches day by day anyway.
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(property_id) = &self.property_id {
            if &booking.property_id != property_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if booking.booking_status != status {
                return false;
            }
        }
        true
    }
}
