use chrono::{Datelike, Months, NaiveDate};
use tracing::warn;

use crate::MonthGrid;

/// Every day of the month containing `reference`, plus the number of blank
/// cells before the 1st (Sunday = 0).
pub fn month_grid(reference: NaiveDate) -> MonthGrid {
    let first = first_of_month(reference);
    let days = first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect();
    MonthGrid {
        days,
        leading_blanks: first.weekday().num_days_from_sunday(),
    }
}

/// First day of the month `delta` months away from `current`'s month.
///
/// Navigation is unbounded; only a step past the range chrono can represent
/// is refused, and then the current month is returned.
pub fn advance_month(current: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(current);
    let months = Months::new(delta.unsigned_abs());
    let moved = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    moved.unwrap_or_else(|| {
        warn!("cannot move {} months from {}", delta, first);
        first
    })
}

/// Same year, month and day. Time of day is ignored and no time-zone
/// conversion is applied to either side.
pub fn is_same_calendar_day(a: &impl Datelike, b: &impl Datelike) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day - chrono::Duration::days(i64::from(day.day0()))
}

impl MonthGrid {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => first <= day && day <= last,
            _ => false,
        }
    }

    /// Week rows of seven cells, `None` for padding before the 1st and
    /// after the last day.
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let cells: Vec<Option<NaiveDate>> = std::iter::repeat(None)
            .take(self.leading_blanks as usize)
            .chain(self.days.iter().copied().map(Some))
            .collect();
        cells
            .chunks(7)
            .map(|chunk| {
                let mut row = [None; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect()
    }
}

/// The caller-held calendar state: month on display and selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub current: NaiveDate,
    pub selected: Option<NaiveDate>,
}

impl CalendarCursor {
    /// Start on today's month with today selected.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current: today,
            selected: Some(today),
        }
    }

    pub fn next_month(&mut self) {
        self.current = advance_month(self.current, 1);
    }

    pub fn previous_month(&mut self) {
        self.current = advance_month(self.current, -1);
    }

    /// Jump back to today's month. The selection is left alone.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.current = today;
    }

    pub fn select(&mut self, day: NaiveDate) {
        self.selected = Some(day);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn grid(&self) -> MonthGrid {
        month_grid(self.current)
    }

    pub fn is_selected(&self, day: NaiveDate) -> bool {
        self.selected
            .map(|selected| is_same_calendar_day(&selected, &day))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Weekday};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_grid_for_leap_february() {
        let grid = month_grid(day(2024, 2, 15));
        assert_eq!(grid.days.len(), 29);
        assert_eq!(grid.days[0], day(2024, 2, 1));
        assert_eq!(grid.days[28], day(2024, 2, 29));
        assert_eq!(day(2024, 2, 1).weekday(), Weekday::Thu);
        assert_eq!(grid.leading_blanks, 4);
    }

    #[test]
    fn month_grid_lengths() {
        assert_eq!(month_grid(day(2023, 2, 1)).days.len(), 28);
        assert_eq!(month_grid(day(2024, 4, 30)).days.len(), 30);
        assert_eq!(month_grid(day(2024, 12, 31)).days.len(), 31);
        assert_eq!(month_grid(day(1900, 2, 10)).days.len(), 28);
        assert_eq!(month_grid(day(2000, 2, 10)).days.len(), 29);
    }

    #[test]
    fn month_grid_days_are_ascending_and_blanks_match_weekday() {
        for m in 1..=12 {
            let grid = month_grid(day(2025, m, 1));
            assert!(grid.days.windows(2).all(|w| w[0].succ_opt() == Some(w[1])));
            assert!(grid.leading_blanks <= 6);
            assert_eq!(
                grid.leading_blanks,
                grid.days[0].weekday().num_days_from_sunday()
            );
        }
        // 2024-09-01 is a Sunday
        assert_eq!(month_grid(day(2024, 9, 20)).leading_blanks, 0);
    }

    #[test]
    fn weeks_pad_both_ends() {
        let grid = month_grid(day(2024, 2, 1));
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks[0][..4].iter().all(Option::is_none));
        assert_eq!(weeks[0][4], Some(day(2024, 2, 1)));
        assert_eq!(weeks[4][4], Some(day(2024, 2, 29)));
        assert_eq!(weeks[4][5], None);
        assert!(grid.contains(day(2024, 2, 29)));
        assert!(!grid.contains(day(2024, 3, 1)));
    }

    #[test]
    fn advance_month_crosses_years() {
        assert_eq!(advance_month(day(2024, 1, 15), -1), day(2023, 12, 1));
        assert_eq!(advance_month(day(2023, 12, 31), 1), day(2024, 1, 1));
        assert_eq!(advance_month(day(2024, 1, 31), 1), day(2024, 2, 1));
        assert_eq!(advance_month(day(2024, 5, 20), 0), day(2024, 5, 1));
        assert_eq!(advance_month(day(2024, 5, 20), 25), day(2026, 6, 1));
        assert_eq!(advance_month(day(2024, 5, 20), -29), day(2021, 12, 1));
    }

    #[test]
    fn advance_month_round_trips() {
        let mut d = day(2019, 1, 31);
        while d < day(2021, 1, 1) {
            let back = advance_month(advance_month(d, 1), -1);
            assert_eq!((back.year(), back.month()), (d.year(), d.month()));
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn advance_month_saturates_at_range_end() {
        assert_eq!(advance_month(NaiveDate::MAX, 1), advance_month(NaiveDate::MAX, 0));
    }

    #[test]
    fn same_calendar_day_ignores_time() {
        let morning = NaiveDateTime::parse_from_str("2024-03-10 06:00", "%Y-%m-%d %H:%M").unwrap();
        let night = NaiveDateTime::parse_from_str("2024-03-10 23:59", "%Y-%m-%d %H:%M").unwrap();
        let next = NaiveDateTime::parse_from_str("2024-03-11 00:00", "%Y-%m-%d %H:%M").unwrap();
        assert!(is_same_calendar_day(&morning, &morning));
        assert!(is_same_calendar_day(&morning, &night));
        assert!(is_same_calendar_day(&night, &day(2024, 3, 10)));
        assert!(!is_same_calendar_day(&night, &next));
        assert!(!is_same_calendar_day(&day(2024, 3, 10), &day(2023, 3, 10)));
    }

    #[test]
    fn cursor_navigation() {
        let today = day(2024, 3, 14);
        let mut cursor = CalendarCursor::new(today);
        assert_eq!(cursor.selected, Some(today));
        assert!(cursor.is_selected(today));

        cursor.previous_month();
        cursor.previous_month();
        cursor.previous_month();
        assert_eq!(cursor.current, day(2023, 12, 1));
        assert_eq!(cursor.grid().days.len(), 31);

        cursor.next_month();
        assert_eq!(cursor.current, day(2024, 1, 1));

        cursor.select(day(2024, 1, 5));
        assert!(!cursor.is_selected(today));
        cursor.go_to_today(today);
        assert_eq!(cursor.current, today);
        assert_eq!(cursor.selected, Some(day(2024, 1, 5)));

        cursor.clear_selection();
        assert!(!cursor.is_selected(day(2024, 1, 5)));
    }
}
