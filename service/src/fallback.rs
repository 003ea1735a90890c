use std::{fs, path::Path};

use abi::{Booking, BookingQuery, BookingsResponse, PaginationMeta};
use booking_calendar::BookingCalendarIndex;
use chrono::NaiveDate;
use tracing::warn;

use crate::{BookingSource, Error};

/// Data plus where it came from.
///
/// `Degraded` means the backend could not be reached and `data` is fixture
/// data (possibly empty). Callers decide how to surface that.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Degraded { data: T, reason: DegradedReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// token missing or expired; the session should be cleared
    Unauthorized,
    /// backend unreachable or failing
    Unavailable(String),
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Degraded { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Degraded { data, .. } => data,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Fetched::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&DegradedReason> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Live(data) => Fetched::Live(f(data)),
            Fetched::Degraded { data, reason } => Fetched::Degraded {
                data: f(data),
                reason,
            },
        }
    }
}

impl From<&Error> for DegradedReason {
    fn from(e: &Error) -> Self {
        match e {
            Error::Unauthorized => DegradedReason::Unauthorized,
            other => DegradedReason::Unavailable(other.to_string()),
        }
    }
}

/// Booking reads that never fail: on backend errors they answer from a
/// fixture set (empty unless configured) and say so.
pub struct FallbackBookings<S> {
    source: S,
    fixtures: Vec<Booking>,
}

impl<S: BookingSource> FallbackBookings<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fixtures: Vec::new(),
        }
    }

    pub fn with_fixtures(mut self, fixtures: Vec<Booking>) -> Self {
        self.fixtures = fixtures;
        self
    }

    /// Read a JSON array of bookings.
    pub fn load_fixtures(path: impl AsRef<Path>) -> Result<Vec<Booking>, Error> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn list(&self, query: &BookingQuery) -> Fetched<BookingsResponse> {
        match self.source.list(query).await {
            Ok(resp) => Fetched::Live(resp),
            Err(e) => {
                warn!("list bookings failed, serving fixtures: {}", e);
                let bookings = self.matching_fixtures(query);
                let pagination =
                    PaginationMeta::single_page(bookings.len(), query.limit, query.offset);
                Fetched::Degraded {
                    data: BookingsResponse {
                        bookings,
                        pagination,
                    },
                    reason: (&e).into(),
                }
            }
        }
    }

    /// When the backend is unreachable, failing or refuses the token, a
    /// fixture with that id stands in for the real one. A 404 and client side
    /// errors are answers, not outages, and are returned as they are.
    pub async fn get(&self, id: &str) -> Result<Fetched<Booking>, Error> {
        match self.source.get(id).await {
            Ok(booking) => Ok(Fetched::Live(booking)),
            Err(e) if !is_outage(&e) => Err(e),
            Err(e) => match self.fixtures.iter().find(|b| b.id == id) {
                Some(booking) => {
                    warn!("get booking {} failed, serving fixture: {}", id, e);
                    Ok(Fetched::Degraded {
                        data: booking.clone(),
                        reason: (&e).into(),
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Calendar index of the month containing `day`.
    pub async fn month(&self, property_id: &str, day: NaiveDate) -> Fetched<BookingCalendarIndex> {
        match self.source.for_month(property_id, day).await {
            Ok(bookings) => Fetched::Live(BookingCalendarIndex::new(bookings)),
            Err(e) => {
                warn!("month bookings failed, serving fixtures: {}", e);
                let query = BookingQuery {
                    property_id: Some(property_id.to_string()),
                    ..Default::default()
                };
                Fetched::Degraded {
                    data: BookingCalendarIndex::new(self.matching_fixtures(&query)),
                    reason: (&e).into(),
                }
            }
        }
    }

    fn matching_fixtures(&self, query: &BookingQuery) -> Vec<Booking> {
        self.fixtures
            .iter()
            .filter(|b| query.matches(b))
            .cloned()
            .collect()
    }
}

fn is_outage(e: &Error) -> bool {
    match e {
        Error::Http(_) | Error::Unauthorized => true,
        Error::Status { status, .. } => *status >= 500,
        Error::NotFound | Error::Abi(_) | Error::Io(_) | Error::Json(_) => false,
    }
}
