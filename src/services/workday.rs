//! Work day service
//!
//! Calendar actions: each call loads the current flags, applies one change
//! and saves the result.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::MonthKey;
use crate::storage::Storage;

/// Parse a calendar day typed by the user (`YYYY-MM-DD`)
pub fn parse_date(input: &str) -> TallyResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TallyError::InputValidation(format!("Invalid date (expected YYYY-MM-DD): {}", input))
    })
}

/// Service for marking worked days
pub struct WorkDayService<'a> {
    storage: &'a Storage,
}

impl<'a> WorkDayService<'a> {
    /// Create a new work day service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Flip a day between worked and not worked; returns the new state
    pub fn toggle(&self, date: NaiveDate) -> TallyResult<bool> {
        let mut days = self.storage.load_work_days();
        let worked = days.toggle(date);
        self.storage.save_work_days(&days)?;

        info!(%date, worked, "toggled work day");
        Ok(worked)
    }

    /// Mark a day as worked; returns false if it already was
    pub fn mark(&self, date: NaiveDate) -> TallyResult<bool> {
        let mut days = self.storage.load_work_days();
        if days.is_worked(date) {
            return Ok(false);
        }
        days.mark(date);
        self.storage.save_work_days(&days)?;

        info!(%date, "marked work day");
        Ok(true)
    }

    /// Clear a day; returns false if it was not marked
    pub fn unmark(&self, date: NaiveDate) -> TallyResult<bool> {
        let mut days = self.storage.load_work_days();
        if !days.unmark(date) {
            return Ok(false);
        }
        self.storage.save_work_days(&days)?;

        info!(%date, "unmarked work day");
        Ok(true)
    }

    /// Worked dates, optionally restricted to one month, ascending
    pub fn list(&self, month: Option<MonthKey>) -> Vec<NaiveDate> {
        let days = self.storage.load_work_days();
        match month {
            Some(month) => days.worked_in_month(month).collect(),
            None => days.worked_dates().collect(),
        }
    }
}
