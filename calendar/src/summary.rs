use std::collections::BTreeMap;

use abi::{Booking, BookingStatus};

/// Totals shown next to a month: counts per status and revenue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthSummary {
    pub total: usize,
    pub by_status: BTreeMap<BookingStatus, usize>,
    /// sum of `total_amount` over bookings that are not cancelled
    pub revenue: f64,
}

impl MonthSummary {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        bookings
            .into_iter()
            .fold(Self::default(), |mut summary, booking| {
                summary.total += 1;
                *summary.by_status.entry(booking.booking_status).or_default() += 1;
                if booking.booking_status.counts_toward_revenue() {
                    summary.revenue += booking.total_amount;
                }
                summary
            })
    }

    pub fn count(&self, status: BookingStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, status: BookingStatus, total: f64) -> Booking {
        let mut b = Booking::new_pending(id, "p", "g", "2024-03-01", "2024-03-02").with_status(status);
        b.total_amount = total;
        b
    }

    #[test]
    fn summary_should_skip_cancelled_revenue() {
        let bookings = vec![
            booking("a", BookingStatus::Confirmed, 300.0),
            booking("b", BookingStatus::Confirmed, 200.0),
            booking("c", BookingStatus::Pending, 50.0),
            booking("d", BookingStatus::Cancelled, 1000.0),
            booking("e", BookingStatus::NoShow, 80.0),
        ];
        let summary = MonthSummary::from_bookings(&bookings);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.count(BookingStatus::Confirmed), 2);
        assert_eq!(summary.count(BookingStatus::Pending), 1);
        assert_eq!(summary.count(BookingStatus::CheckedIn), 0);
        assert_eq!(summary.revenue, 630.0);
    }

    #[test]
    fn empty_summary() {
        let none: Vec<Booking> = Vec::new();
        let summary = MonthSummary::from_bookings(&none);
        assert_eq!(summary, MonthSummary::default());
    }
}
