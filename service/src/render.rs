//! Plain-text rendering for the terminal front end.
use std::fmt::Write;

use abi::{Booking, BookingStatus};
use booking_calendar::{DayCell, MonthSummary, MonthView};
use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL: usize = 5;

/// Sunday-first month grid. `*` marks today, `>` the selected day, the last
/// column of a cell is the number of bookings that night.
pub fn render_month(view: &MonthView<'_>, today: NaiveDate, selected: Option<NaiveDate>) -> String {
    let mut out = String::new();
    let grid = view.grid();
    if let Some(first) = grid.first_day() {
        let _ = writeln!(out, "{}", first.format("%B %Y"));
    }
    for name in WEEKDAYS {
        let _ = write!(out, "{:>width$}", name, width = CELL);
    }
    out.push('\n');

    let cells = view.cells(today, selected);
    for week in grid.weeks() {
        for slot in week {
            match slot.and_then(|day| cells.get(day.day0() as usize)) {
                Some(cell) => out.push_str(&render_cell(cell)),
                None => out.push_str(&" ".repeat(CELL)),
            }
        }
        out.push('\n');
    }
    out
}

fn render_cell(cell: &DayCell<'_>) -> String {
    let mark = if cell.is_today {
        '*'
    } else if cell.is_selected {
        '>'
    } else {
        ' '
    };
    let count = match cell.bookings.len() {
        0 => '.',
        n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
        _ => '+',
    };
    format!(" {}{:>2}{}", mark, cell.date.day(), count)
}

/// One line per booking occupying `day`.
pub fn render_day(day: NaiveDate, bookings: &[&Booking]) -> String {
    let mut out = format!("{}: ", day.format("%B %-d, %Y"));
    match bookings.len() {
        0 => {
            out.push_str("no bookings\n");
            return out;
        }
        1 => out.push_str("1 booking\n"),
        n => {
            let _ = writeln!(out, "{} bookings", n);
        }
    }
    for booking in bookings {
        let nights = booking
            .nights()
            .map(|n| n.to_string())
            .unwrap_or_else(|_| "?".to_string());
        let _ = writeln!(
            out,
            "  {} [{}] {} -> {}, {} nights, {} guests, ${:.2}",
            booking.guest_name,
            booking.booking_status.label(),
            booking.check_in_date,
            booking.check_out_date,
            nights,
            booking.number_of_guests,
            booking.total_amount,
        );
    }
    out
}

pub fn render_summary(summary: &MonthSummary) -> String {
    format!(
        "Total bookings: {}\nConfirmed: {}\nPending: {}\nRevenue: ${:.2}\n",
        summary.total,
        summary.count(BookingStatus::Confirmed),
        summary.count(BookingStatus::Pending),
        summary.revenue,
    )
}
