//! Worked-day records
//!
//! A mapping from calendar day to a "worked" flag. Only `true` entries carry
//! meaning; a missing date or a `false` flag both mean "not worked".

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::MonthKey;

/// The set of worked days, persisted as `{ "YYYY-MM-DD": true, ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDays(BTreeMap<NaiveDate, bool>);

impl WorkDays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set where every given date is worked
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self(dates.into_iter().map(|d| (d, true)).collect())
    }

    /// Record a raw flag as loaded from storage or a backup
    pub fn set_flag(&mut self, date: NaiveDate, worked: bool) {
        self.0.insert(date, worked);
    }

    /// Check if a date is marked as worked
    pub fn is_worked(&self, date: NaiveDate) -> bool {
        self.0.get(&date).copied().unwrap_or(false)
    }

    /// Mark a date as worked
    pub fn mark(&mut self, date: NaiveDate) {
        self.0.insert(date, true);
    }

    /// Remove a date; unworked days are never kept as explicit `false`
    pub fn unmark(&mut self, date: NaiveDate) -> bool {
        self.0.remove(&date).unwrap_or(false)
    }

    /// Flip a date and return its new state
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.is_worked(date) {
            self.0.remove(&date);
            false
        } else {
            self.0.insert(date, true);
            true
        }
    }

    /// Iterate worked dates in ascending order
    pub fn worked_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0
            .iter()
            .filter(|(_, worked)| **worked)
            .map(|(date, _)| *date)
    }

    /// Worked dates falling in the given month
    pub fn worked_in_month(&self, month: MonthKey) -> impl Iterator<Item = NaiveDate> + '_ {
        self.worked_dates().filter(move |d| month.contains(*d))
    }

    /// Worked dates falling in the given year
    pub fn worked_in_year(&self, year: i32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.worked_dates().filter(move |d| d.year() == year)
    }

    /// Number of worked days overall
    pub fn worked_count(&self) -> usize {
        self.worked_dates().count()
    }

    /// Number of raw entries, including explicit `false` flags
    pub fn raw_len(&self) -> usize {
        self.0.len()
    }

    /// Copy with every non-worked entry dropped
    pub fn worked_only(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, worked)| **worked)
                .map(|(date, _)| (*date, true))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_twice_clears() {
        let mut days = WorkDays::new();
        assert!(days.toggle(date(2025, 4, 19)));
        assert!(days.is_worked(date(2025, 4, 19)));

        assert!(!days.toggle(date(2025, 4, 19)));
        assert!(!days.is_worked(date(2025, 4, 19)));
        assert_eq!(days.raw_len(), 0);
    }

    #[test]
    fn test_false_flags_are_not_worked() {
        let mut days = WorkDays::new();
        days.set_flag(date(2025, 4, 1), true);
        days.set_flag(date(2025, 4, 2), false);

        assert_eq!(days.worked_count(), 1);
        assert_eq!(days.raw_len(), 2);
        assert_eq!(days.worked_only().raw_len(), 1);
    }

    #[test]
    fn test_month_and_year_filters() {
        let days = WorkDays::from_dates([
            date(2024, 12, 31),
            date(2025, 1, 2),
            date(2025, 1, 3),
            date(2025, 2, 3),
        ]);

        let jan = MonthKey::new(2025, 1).unwrap();
        assert_eq!(days.worked_in_month(jan).count(), 2);
        assert_eq!(days.worked_in_year(2025).count(), 3);
        assert_eq!(days.worked_in_year(2024).count(), 1);
    }

    #[test]
    fn test_json_shape() {
        let mut days = WorkDays::from_dates([date(2025, 4, 19)]);
        days.set_flag(date(2025, 4, 20), false);

        let json = serde_json::to_string(&days).unwrap();
        assert_eq!(json, r#"{"2025-04-19":true,"2025-04-20":false}"#);

        let back: WorkDays = serde_json::from_str(&json).unwrap();
        assert_eq!(back, days);
    }
}
