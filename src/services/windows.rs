//! Calendar windows anchored to an instant
//!
//! All boundaries are computed in UTC. Every window is half-open
//! `[start, end)`; a current-period window ends at the start of the next
//! period, which is the same as closing it at the period's last instant.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: midnight(start),
            end: midnight(end),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Last millisecond still inside the window
    pub fn last_instant(&self) -> DateTime<Utc> {
        self.end - Duration::milliseconds(1)
    }
}

/// Day, week, month and year windows for "this" and "last" periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    pub today: Window,
    pub yesterday: Window,
    pub this_week: Window,
    pub last_week: Window,
    pub this_month: Window,
    pub last_month: Window,
    pub this_year: Window,
    pub last_year: Window,
}

impl PeriodWindows {
    pub fn anchored_at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let tomorrow = today + Days::new(1);
        let yesterday = today - Days::new(1);

        let monday = start_of_week_monday(today);
        let next_monday = monday + Days::new(7);
        let last_monday = monday - Days::new(7);

        let first_of_month = start_of_month(today);
        let first_of_next_month = first_of_month + Months::new(1);
        let first_of_last_month = first_of_month - Months::new(1);

        let jan_first = start_of_year(today);
        let next_jan_first = jan_first + Months::new(12);
        let last_jan_first = jan_first - Months::new(12);

        Self {
            today: Window::between(today, tomorrow),
            yesterday: Window::between(yesterday, today),
            this_week: Window::between(monday, next_monday),
            last_week: Window::between(last_monday, monday),
            this_month: Window::between(first_of_month, first_of_next_month),
            last_month: Window::between(first_of_last_month, first_of_month),
            this_year: Window::between(jan_first, next_jan_first),
            last_year: Window::between(last_jan_first, jan_first),
        }
    }
}

pub(crate) fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

pub(crate) fn start_of_week_monday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub(crate) fn start_of_week_sunday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

pub(crate) fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub(crate) fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_day_windows() {
        // Monday 2024-01-15
        let w = PeriodWindows::anchored_at(at(2024, 1, 15, 23));
        assert_eq!(w.today.start, at(2024, 1, 15, 0));
        assert_eq!(w.today.end, at(2024, 1, 16, 0));
        assert_eq!(w.yesterday.start, at(2024, 1, 14, 0));
        assert_eq!(w.yesterday.end, at(2024, 1, 15, 0));
    }

    #[test]
    fn test_week_starts_monday() {
        // Wednesday 2024-01-17
        let w = PeriodWindows::anchored_at(at(2024, 1, 17, 12));
        assert_eq!(w.this_week.start, at(2024, 1, 15, 0));
        assert_eq!(w.this_week.end, at(2024, 1, 22, 0));
        assert_eq!(w.last_week.start, at(2024, 1, 8, 0));
        assert_eq!(w.last_week.end, at(2024, 1, 15, 0));
    }

    #[test]
    fn test_sunday_belongs_to_week_started_previous_monday() {
        let w = PeriodWindows::anchored_at(at(2024, 1, 21, 8));
        assert_eq!(w.this_week.start, at(2024, 1, 15, 0));
    }

    #[test]
    fn test_month_windows_cover_whole_last_day() {
        let w = PeriodWindows::anchored_at(at(2024, 3, 10, 9));
        assert_eq!(w.this_month.start, at(2024, 3, 1, 0));
        assert_eq!(w.this_month.end, at(2024, 4, 1, 0));
        assert_eq!(w.last_month.start, at(2024, 2, 1, 0));
        assert_eq!(w.last_month.end, at(2024, 3, 1, 0));
        // Leap day evening is still last month
        assert!(w.last_month.contains(at(2024, 2, 29, 22)));
    }

    #[test]
    fn test_january_rolls_back_to_december() {
        let w = PeriodWindows::anchored_at(at(2024, 1, 5, 9));
        assert_eq!(w.last_month.start, at(2023, 12, 1, 0));
        assert_eq!(w.last_year.start, at(2023, 1, 1, 0));
        assert_eq!(w.last_year.end, at(2024, 1, 1, 0));
        assert_eq!(w.this_year.end, at(2025, 1, 1, 0));
    }

    #[test]
    fn test_window_is_half_open() {
        let w = PeriodWindows::anchored_at(at(2024, 1, 15, 12));
        assert!(w.today.contains(w.today.start));
        assert!(!w.today.contains(w.today.end));
        assert!(w.yesterday.contains(w.yesterday.last_instant()));
        assert_eq!(
            w.this_week.last_instant(),
            Utc.with_ymd_and_hms(2024, 1, 21, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_start_of_helpers() {
        assert_eq!(start_of_week_monday(date(2024, 2, 1)), date(2024, 1, 29));
        assert_eq!(start_of_week_sunday(date(2024, 2, 1)), date(2024, 1, 28));
        assert_eq!(start_of_week_sunday(date(2024, 1, 28)), date(2024, 1, 28));
        assert_eq!(start_of_month(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(start_of_year(date(2024, 12, 31)), date(2024, 1, 1));
    }
}
