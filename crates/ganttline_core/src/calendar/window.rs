//! Month window model and edit operations.
//!
//! # Responsibility
//! - Build a window of consecutive months starting at the clock's month.
//! - Extend and shrink an explicit window one month at a time.
//!
//! # Invariants
//! - `MonthWindow` always holds at least one month.
//! - No two months share the same `(year, month_index)`.
//! - Day counts come from the real calendar, leap years included.

use crate::clock::Clock;
use chrono::{Datelike, Months, NaiveDate};
use log::debug;

/// One calendar month in the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    /// First day of the month. Ordering follows this field first.
    pub start_date: NaiveDate,
    pub year: i32,
    /// Zero-based month (`0` = January).
    pub month_index: u32,
    pub day_count: u32,
}

impl Month {
    /// Month with zero-based `month_index`; `None` outside `0..=11` or the
    /// supported calendar range.
    pub fn new(year: i32, month_index: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month_index.checked_add(1)?, 1)?;
        Some(Self::containing(start_date))
    }

    /// Month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start_date = date.with_day(1).unwrap_or(date);
        Self {
            start_date,
            year: start_date.year(),
            month_index: start_date.month0(),
            day_count: days_in_month(start_date),
        }
    }

    /// The calendar month right after this one.
    pub fn next(&self) -> Option<Self> {
        self.start_date
            .checked_add_months(Months::new(1))
            .map(Self::containing)
    }

    /// `(year, month_index)` identity used for duplicate checks.
    pub fn key(&self) -> (i32, u32) {
        (self.year, self.month_index)
    }

    /// Last calendar day of the month.
    pub fn last_date(&self) -> NaiveDate {
        self.start_date
            .with_day(self.day_count)
            .unwrap_or(self.start_date)
    }

    /// Inclusive containment on both month edges.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.last_date()
    }

    /// Header label such as `Mar 2025`.
    pub fn label(&self) -> String {
        self.start_date.format("%b %Y").to_string()
    }
}

/// Largest day of month that exists in the calendar for `first_of_month`.
fn days_in_month(first_of_month: NaiveDate) -> u32 {
    (28..=31)
        .rev()
        .find(|day| first_of_month.with_day(*day).is_some())
        .unwrap_or(28)
}

/// Ordered, non-empty list of visible months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    months: Vec<Month>,
}

/// Builds `count` consecutive months starting at the clock's current month.
///
/// A `count` of zero is raised to one so the window is never empty. The
/// window stops early at the last month the calendar can represent.
pub fn generate_window(clock: &impl Clock, count: usize) -> MonthWindow {
    let today = clock.today();
    let first = Month::containing(today);
    let mut months = vec![first];
    while months.len() < count {
        match months.last().and_then(Month::next) {
            Some(next) => months.push(next),
            None => break,
        }
    }
    debug!(
        "event=window_generate module=calendar status=ok months={} first={}",
        months.len(),
        first.label()
    );
    MonthWindow { months }
}

impl MonthWindow {
    /// Builds a window from arbitrary months, sorting them and dropping
    /// duplicates. Returns `None` when `months` is empty.
    pub fn from_months(mut months: Vec<Month>) -> Option<Self> {
        if months.is_empty() {
            return None;
        }
        months.sort();
        months.dedup_by_key(|month| month.key());
        Some(Self { months })
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Month> {
        self.months.iter()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn first(&self) -> &Month {
        &self.months[0]
    }

    pub fn last(&self) -> &Month {
        &self.months[self.months.len() - 1]
    }

    /// Sum of day counts over all visible months.
    pub fn total_days(&self) -> u32 {
        self.months.iter().map(|month| month.day_count).sum()
    }

    /// Position of the visible month containing `date`.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.months.iter().position(|month| month.contains(date))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.position_of(date).is_some()
    }

    /// Sum of day counts of the months strictly before `index`.
    pub fn days_before(&self, index: usize) -> u32 {
        self.months
            .iter()
            .take(index)
            .map(|month| month.day_count)
            .sum()
    }

    /// Inserts the month following `self[index]` right after it.
    ///
    /// Returns `false` without changes when `index` is out of range or that
    /// month is already visible.
    pub fn extend_after(&mut self, index: usize) -> bool {
        let Some(next) = self.months.get(index).and_then(Month::next) else {
            return false;
        };
        if self.months.iter().any(|month| month.key() == next.key()) {
            return false;
        }
        self.months.insert(index + 1, next);
        debug!(
            "event=window_extend module=calendar status=ok inserted={} months={}",
            next.label(),
            self.months.len()
        );
        true
    }

    /// Removes the month at `index`.
    ///
    /// Returns `false` without changes when `index` is out of range or it is
    /// the last remaining month.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.months.len() <= 1 || index >= self.months.len() {
            return false;
        }
        let removed = self.months.remove(index);
        debug!(
            "event=window_remove module=calendar status=ok removed={} months={}",
            removed.label(),
            self.months.len()
        );
        true
    }

    /// Regenerates the window from the clock's month with one more month.
    pub fn grow(&mut self, clock: &impl Clock) {
        *self = generate_window(clock, self.months.len() + 1);
    }

    /// Regenerates the window from the clock's month with one month fewer.
    ///
    /// Returns `false` without changes at one month.
    pub fn shrink(&mut self, clock: &impl Clock) -> bool {
        if self.months.len() < 2 {
            return false;
        }
        *self = generate_window(clock, self.months.len() - 1);
        true
    }
}

impl<'a> IntoIterator for &'a MonthWindow {
    type Item = &'a Month;
    type IntoIter = std::slice::Iter<'a, Month>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_window, Month, MonthWindow};
    use crate::clock::FixedClock;
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_day_counts_follow_calendar() {
        assert_eq!(Month::new(2024, 1).unwrap().day_count, 29);
        assert_eq!(Month::new(2025, 1).unwrap().day_count, 28);
        assert_eq!(Month::new(1900, 1).unwrap().day_count, 28);
        assert_eq!(Month::new(2000, 1).unwrap().day_count, 29);
        assert_eq!(Month::new(2025, 3).unwrap().day_count, 30);
        assert_eq!(Month::new(2025, 11).unwrap().day_count, 31);
        assert!(Month::new(2025, 12).is_none());
    }

    #[test]
    fn month_next_rolls_over_year() {
        let december = Month::new(2025, 11).unwrap();
        let january = december.next().unwrap();
        assert_eq!(january.key(), (2026, 0));
        assert_eq!(january.label(), "Jan 2026");
    }

    #[test]
    fn contains_is_inclusive_on_both_edges() {
        let march = Month::new(2025, 2).unwrap();
        assert!(march.contains(date(2025, 3, 1)));
        assert!(march.contains(date(2025, 3, 31)));
        assert!(!march.contains(date(2025, 4, 1)));
        assert!(!march.contains(date(2025, 2, 28)));
    }

    #[test]
    fn generate_window_starts_at_clock_month() {
        let clock = FixedClock(date(2025, 11, 20));
        let window = generate_window(&clock, 3);
        let keys: Vec<_> = window.iter().map(Month::key).collect();
        assert_eq!(keys, vec![(2025, 10), (2025, 11), (2026, 0)]);
        assert_eq!(window.total_days(), 30 + 31 + 31);
    }

    #[test]
    fn generate_window_never_returns_empty() {
        let clock = FixedClock(date(2025, 3, 1));
        assert_eq!(generate_window(&clock, 0).len(), 1);
    }

    #[test]
    fn generate_window_stops_at_calendar_limit_for_huge_counts() {
        let last_year = NaiveDate::MAX.year();
        let clock = FixedClock(date(last_year, 11, 1));
        let window = generate_window(&clock, usize::MAX);
        assert_eq!(window.len(), 2);
        assert_eq!(window.last().start_date, date(last_year, 12, 1));
    }

    #[test]
    fn from_months_sorts_and_dedups() {
        let april = Month::new(2025, 3).unwrap();
        let march = Month::new(2025, 2).unwrap();
        let window = MonthWindow::from_months(vec![april, march, april]).unwrap();
        assert_eq!(window.months(), &[march, april]);
        assert!(MonthWindow::from_months(Vec::new()).is_none());
    }

    #[test]
    fn extend_after_inserts_adjacent_month_once() {
        let january = Month::new(2025, 0).unwrap();
        let march = Month::new(2025, 2).unwrap();
        let mut window = MonthWindow::from_months(vec![january, march]).unwrap();

        assert!(window.extend_after(0));
        assert!(!window.extend_after(0));
        let keys: Vec<_> = window.iter().map(Month::key).collect();
        assert_eq!(keys, vec![(2025, 0), (2025, 1), (2025, 2)]);
    }

    #[test]
    fn extend_after_out_of_range_is_noop() {
        let clock = FixedClock(date(2025, 3, 1));
        let mut window = generate_window(&clock, 1);
        assert!(!window.extend_after(4));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn grow_and_shrink_regenerate_from_clock() {
        let clock = FixedClock(date(2025, 3, 1));
        let mut window = generate_window(&clock, 1);
        window.grow(&clock);
        window.grow(&clock);
        assert_eq!(window.len(), 3);
        assert!(window.shrink(&clock));
        assert!(window.shrink(&clock));
        assert!(!window.shrink(&clock));
        assert_eq!(window.len(), 1);
        assert_eq!(window.first().key(), (2025, 2));
    }

    #[test]
    fn days_before_sums_prefix() {
        let clock = FixedClock(date(2025, 1, 15));
        let window = generate_window(&clock, 3);
        assert_eq!(window.days_before(0), 0);
        assert_eq!(window.days_before(1), 31);
        assert_eq!(window.days_before(2), 31 + 28);
        assert_eq!(window.position_of(date(2025, 2, 28)), Some(1));
        assert_eq!(window.position_of(date(2025, 4, 1)), None);
    }
}
