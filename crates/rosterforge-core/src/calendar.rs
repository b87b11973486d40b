//! Calendar partitioning for a roster month.
//!
//! Weekly constraints are scoped to Sunday-to-Saturday weeks. The first and
//! last week of a month may be partial; weeks are derived purely from the
//! calendar and never stored.

use std::fmt;
use std::ops::Range;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{Result, RosterError};

/// Number of days in a full week.
pub const DAYS_PER_WEEK: usize = 7;

/// A calendar month targeted by one generation run.
///
/// # Example
///
/// ```
/// use rosterforge_core::RosterMonth;
///
/// let march = RosterMonth::new(2026, 3).unwrap();
/// assert_eq!(march.day_count(), 31);
///
/// // March 1st 2026 is a Sunday: four full weeks plus a 3-day tail
/// let lens: Vec<usize> = march.weeks().iter().map(|w| w.len()).collect();
/// assert_eq!(lens, vec![7, 7, 7, 7, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterMonth {
    year: i32,
    month: u32,
}

impl RosterMonth {
    /// Creates a roster month, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(RosterError::InvalidMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Returns the number of calendar days in the month.
    pub fn day_count(&self) -> usize {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.map(|n| (n - first).num_days() as usize).unwrap_or(31)
    }

    /// Returns the date of the given 0-based day index.
    pub fn date_of(&self, day: usize) -> Option<NaiveDate> {
        if day >= self.day_count() {
            return None;
        }
        self.first_day().checked_add_days(Days::new(day as u64))
    }

    /// Returns the 0-based day index of a date, if it falls in this month.
    pub fn day_index_of(&self, date: NaiveDate) -> Option<usize> {
        if date.year() == self.year && date.month() == self.month {
            Some(date.day0() as usize)
        } else {
            None
        }
    }

    /// Returns every calendar date of the month in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.day_count())
            .collect()
    }

    /// Partitions the month into Sunday-to-Saturday weeks.
    ///
    /// A week closes on each Saturday; the trailing days after the last
    /// Saturday form the final (possibly partial) week.
    pub fn weeks(&self) -> Vec<Week> {
        let mut weeks = Vec::new();
        let mut start = 0;

        for (day, date) in self.dates().into_iter().enumerate() {
            if date.weekday() == Weekday::Sat {
                weeks.push(Week::new(weeks.len(), start, day + 1 - start));
                start = day + 1;
            }
        }

        let day_count = self.day_count();
        if start < day_count {
            weeks.push(Week::new(weeks.len(), start, day_count - start));
        }
        weeks
    }
}

impl fmt::Display for RosterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A contiguous run of days from Sunday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    index: usize,
    first_day: usize,
    len: usize,
}

impl Week {
    pub fn new(index: usize, first_day: usize, len: usize) -> Self {
        Self {
            index,
            first_day,
            len,
        }
    }

    /// Position of this week within the month (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Day index of the first day of this week.
    pub fn first_day(&self) -> usize {
        self.first_day
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true for a 7-day week.
    pub fn is_full(&self) -> bool {
        self.len == DAYS_PER_WEEK
    }

    /// Day indices covered by this week.
    pub fn days(&self) -> Range<usize> {
        self.first_day..self.first_day + self.len
    }

    pub fn contains(&self, day: usize) -> bool {
        self.days().contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_lens(year: i32, month: u32) -> Vec<usize> {
        RosterMonth::new(year, month)
            .unwrap()
            .weeks()
            .iter()
            .map(Week::len)
            .collect()
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            RosterMonth::new(2026, 13),
            Err(RosterError::InvalidMonth {
                year: 2026,
                month: 13
            })
        );
        assert!(RosterMonth::new(2026, 0).is_err());
    }

    #[test]
    fn test_day_counts() {
        assert_eq!(RosterMonth::new(2026, 2).unwrap().day_count(), 28);
        assert_eq!(RosterMonth::new(2024, 2).unwrap().day_count(), 29);
        assert_eq!(RosterMonth::new(2026, 4).unwrap().day_count(), 30);
        assert_eq!(RosterMonth::new(2026, 12).unwrap().day_count(), 31);
    }

    #[test]
    fn test_aligned_february() {
        // February 2026 starts on a Sunday and has exactly four full weeks.
        assert_eq!(week_lens(2026, 2), vec![7, 7, 7, 7]);
    }

    #[test]
    fn test_partial_first_and_last_weeks() {
        // 2026-01-01 is a Thursday.
        assert_eq!(week_lens(2026, 1), vec![3, 7, 7, 7, 7]);
        // 2026-06-01 is a Monday.
        assert_eq!(week_lens(2026, 6), vec![6, 7, 7, 7, 3]);
        // 2022-10-01 is a Saturday: a one-day first week.
        assert_eq!(week_lens(2022, 10), vec![1, 7, 7, 7, 7, 2]);
    }

    #[test]
    fn test_partition_invariants_across_years() {
        for year in 1999..=2031 {
            for month in 1..=12 {
                let m = RosterMonth::new(year, month).unwrap();
                let weeks = m.weeks();
                let dates = m.dates();

                assert_eq!(weeks.iter().map(Week::len).sum::<usize>(), m.day_count());
                assert_eq!(weeks[0].first_day(), 0);

                for (i, w) in weeks.iter().enumerate() {
                    assert_eq!(w.index(), i);
                    assert!(!w.is_empty() && w.len() <= DAYS_PER_WEEK);
                    if i > 0 {
                        assert_eq!(dates[w.first_day()].weekday(), Weekday::Sun);
                        assert_eq!(weeks[i - 1].days().end, w.first_day());
                    }
                    if i + 1 < weeks.len() {
                        assert_eq!(dates[w.days().end - 1].weekday(), Weekday::Sat);
                    }
                    if i > 0 && i + 1 < weeks.len() {
                        assert!(w.is_full(), "{m}: interior week {i} must be full");
                    }
                }
            }
        }
    }

    #[test]
    fn test_date_lookup() {
        let m = RosterMonth::new(2026, 3).unwrap();
        let d = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(m.day_index_of(d), Some(30));
        assert_eq!(m.date_of(30), Some(d));
        assert_eq!(m.date_of(31), None);
        assert_eq!(
            m.day_index_of(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()),
            None
        );
        assert_eq!(m.to_string(), "2026-03");
    }
}
