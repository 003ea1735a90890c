use std::collections::BTreeMap;

use abi::{Booking, BookingStatus};
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    is_same_calendar_day, month_grid, BookingCalendarIndex, DayCell, MonthGrid, MonthSummary,
    MonthView,
};

impl BookingCalendarIndex {
    pub fn new(bookings: Vec<Booking>) -> Self {
        let mut stays = Vec::with_capacity(bookings.len());
        let mut skipped = 0;
        for (pos, booking) in bookings.iter().enumerate() {
            match booking.stay() {
                Ok(stay) if !stay.is_empty() => stays.push((pos, stay)),
                Ok(_) => {}
                Err(e) => {
                    debug!("skip booking {}: {}", booking.id, e);
                    skipped += 1;
                }
            }
        }
        Self {
            bookings,
            stays,
            skipped,
        }
    }

    /// the whole snapshot, malformed bookings included
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// number of bookings whose dates could not be parsed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Same answer as [`crate::for_date`] over the snapshot.
    pub fn bookings_on(&self, day: NaiveDate) -> Vec<&Booking> {
        self.stays
            .iter()
            .filter(|(_, stay)| stay.contains(day))
            .map(|(pos, _)| &self.bookings[*pos])
            .collect()
    }

    pub fn is_booked(&self, day: NaiveDate) -> bool {
        self.stays.iter().any(|(_, stay)| stay.contains(day))
    }

    /// Status of the first booking (snapshot order) covering `day`.
    pub fn status_on(&self, day: NaiveDate) -> Option<BookingStatus> {
        self.stays
            .iter()
            .find(|(_, stay)| stay.contains(day))
            .map(|(pos, _)| self.bookings[*pos].booking_status)
    }

    pub fn find(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }

    /// Day-keyed view of the month containing `reference`.
    pub fn month(&self, reference: NaiveDate) -> MonthView<'_> {
        let grid = month_grid(reference);
        let mut bookings = Vec::new();
        let mut by_day: BTreeMap<NaiveDate, Vec<&Booking>> = BTreeMap::new();

        if let (Some(first), Some(last)) = (grid.first_day(), grid.last_day()) {
            for (pos, stay) in &self.stays {
                let start = stay.check_in.max(first);
                // last night inside both the stay and the month
                let end = match stay.check_out.pred_opt() {
                    Some(last_night) => last_night.min(last),
                    None => continue,
                };
                if start > end {
                    continue;
                }
                let booking = &self.bookings[*pos];
                bookings.push(booking);
                for day in start.iter_days().take_while(|d| *d <= end) {
                    by_day.entry(day).or_default().push(booking);
                }
            }
        }

        MonthView {
            grid,
            bookings,
            by_day,
        }
    }

    /// Summary over the whole snapshot.
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::from_bookings(&self.bookings)
    }
}

impl From<Vec<Booking>> for BookingCalendarIndex {
    fn from(bookings: Vec<Booking>) -> Self {
        Self::new(bookings)
    }
}

impl FromIterator<Booking> for BookingCalendarIndex {
    fn from_iter<T: IntoIterator<Item = Booking>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> MonthView<'a> {
    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    /// Bookings with at least one night in this month, snapshot order.
    pub fn bookings(&self) -> &[&'a Booking] {
        &self.bookings
    }

    /// Empty for days outside the month.
    pub fn bookings_on(&self, day: NaiveDate) -> &[&'a Booking] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// number of days with at least one booking
    pub fn occupied_days(&self) -> usize {
        self.by_day.len()
    }

    pub fn cells(&self, today: NaiveDate, selected: Option<NaiveDate>) -> Vec<DayCell<'a>> {
        self.grid
            .days
            .iter()
            .map(|&date| DayCell {
                date,
                is_today: is_same_calendar_day(&date, &today),
                is_selected: selected
                    .map(|s| is_same_calendar_day(&date, &s))
                    .unwrap_or(false),
                bookings: self.bookings_on(date).to_vec(),
            })
            .collect()
    }

    pub fn summary(&self) -> MonthSummary {
        MonthSummary::from_bookings(self.bookings.iter().copied())
    }
}

impl DayCell<'_> {
    pub fn is_booked(&self) -> bool {
        !self.bookings.is_empty()
    }

    /// status of the first booking in the cell
    pub fn status(&self) -> Option<BookingStatus> {
        self.bookings.first().map(|booking| booking.booking_status)
    }
}
