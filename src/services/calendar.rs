//! Worked-day aggregation
//!
//! Turns worked-day flags into per-month and per-year income figures. Tax is
//! computed per month; yearly totals add the month rows rather than taxing
//! the annual gross again, so the TOTAL row always matches the months shown
//! above it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Money, MonthKey, MonthSummary, SummaryTotal, WorkDays, YearSummary};

use super::tax::compute_tax;

/// Build the summary for one month from its worked-day count
fn month_row(month: MonthKey, worked_days: u32, rate: Money) -> MonthSummary {
    let gross = rate * Decimal::from(worked_days);
    let tax = compute_tax(gross);

    MonthSummary {
        month,
        worked_days,
        gross,
        net: tax.net,
        taxes: tax.total_tax(),
    }
}

/// Group dates by month and emit one row per populated month, ascending
fn summarize_dates<I: Iterator<Item = NaiveDate>>(dates: I, rate: Money) -> YearSummary {
    let mut counts: BTreeMap<MonthKey, u32> = BTreeMap::new();
    for date in dates {
        *counts.entry(MonthKey::of(date)).or_insert(0) += 1;
    }

    let months: Vec<MonthSummary> = counts
        .into_iter()
        .map(|(month, count)| month_row(month, count, rate))
        .collect();
    let total = SummaryTotal::from_months(&months);

    YearSummary { months, total }
}

/// Income figures for a single month
///
/// Always answers for the requested month, with zeros when nothing was worked.
pub fn summarize_month(work_days: &WorkDays, rate: Money, month: MonthKey) -> MonthSummary {
    let count = work_days.worked_in_month(month).count() as u32;
    month_row(month, count, rate)
}

/// Per-month rows for one year, plus the TOTAL row
///
/// Months without worked days are omitted.
pub fn summarize_year(work_days: &WorkDays, rate: Money, year: i32) -> YearSummary {
    summarize_dates(work_days.worked_in_year(year), rate)
}

/// Per-month rows across every year with data, plus the TOTAL row
pub fn summarize_all(work_days: &WorkDays, rate: Money) -> YearSummary {
    summarize_dates(work_days.worked_dates(), rate)
}

/// Gross income for a whole year (worked days in the year times the rate)
pub fn yearly_gross(work_days: &WorkDays, rate: Money, year: i32) -> Money {
    rate * Decimal::from(work_days.worked_in_year(year).count() as u64)
}
