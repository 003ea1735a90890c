//! Calendar view over a snapshot of bookings.
//!
//! Everything here is a pure function of a booking snapshot and a few dates:
//! which bookings occupy a day, what a month grid looks like and how month
//! navigation moves. The caller owns the only mutable state (the displayed
//! month and the selected day), see [`CalendarCursor`].
mod index;
mod matching;
mod month;
mod summary;

use std::collections::BTreeMap;

use abi::{Booking, Stay};
use chrono::NaiveDate;

pub use matching::{calendar_day, for_date, nights};
pub use month::{advance_month, is_same_calendar_day, month_grid, CalendarCursor};
pub use summary::MonthSummary;

/// Days of one month plus the blank cells that push the 1st under its
/// weekday column. Weeks start on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub days: Vec<NaiveDate>,
    pub leading_blanks: u32,
}

/// Booking snapshot with every stay parsed once.
///
/// Rebuilt from scratch on every fetch, never mutated.
#[derive(Debug, Clone, Default)]
pub struct BookingCalendarIndex {
    bookings: Vec<Booking>,
    /// (position in `bookings`, parsed stay), non-empty stays only
    stays: Vec<(usize, Stay)>,
    skipped: usize,
}

/// One month of an index, keyed by day for constant time cell lookups.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    grid: MonthGrid,
    bookings: Vec<&'a Booking>,
    by_day: BTreeMap<NaiveDate, Vec<&'a Booking>>,
}

/// What a calendar cell needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub bookings: Vec<&'a Booking>,
}
