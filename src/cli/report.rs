//! Report CLI commands
//!
//! Month stats, the year table and the coverage report.

use chrono::{Datelike, Local, NaiveDate};

use crate::display::{format_coverage_report, format_month_summary, format_year_summary};
use crate::error::{TallyError, TallyResult};
use crate::models::MonthKey;
use crate::services::{compute_tax, coverage_report, parse_date, summarize_all, summarize_month, summarize_year};
use crate::storage::Storage;

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Handle `month [YYYY-MM]`
pub fn handle_month_command(storage: &Storage, month: Option<String>) -> TallyResult<()> {
    let month = match month {
        Some(text) => {
            MonthKey::parse(&text).map_err(|e| TallyError::InputValidation(e.to_string()))?
        }
        None => MonthKey::of(today()),
    };

    let rate = storage.load_daily_rate();
    let work_days = storage.load_work_days();
    let summary = summarize_month(&work_days, rate, month);
    let tax = compute_tax(summary.gross);

    print!("{}", format_month_summary(&summary, rate, &tax));
    Ok(())
}

/// Handle `year [YYYY] [--all]`
pub fn handle_year_command(storage: &Storage, year: Option<i32>, all: bool) -> TallyResult<()> {
    let rate = storage.load_daily_rate();
    let work_days = storage.load_work_days();

    if all {
        let summary = summarize_all(&work_days, rate);
        print!("{}", format_year_summary("All recorded months", &summary));
    } else {
        let year = year.unwrap_or_else(|| today().year());
        let summary = summarize_year(&work_days, rate, year);
        print!("{}", format_year_summary(&format!("Income for {}", year), &summary));
    }

    Ok(())
}

/// Handle `coverage [--as-of DATE]`
pub fn handle_coverage_command(storage: &Storage, as_of: Option<String>) -> TallyResult<()> {
    let reference_date = match as_of {
        Some(text) => parse_date(&text)?,
        None => today(),
    };

    let report = coverage_report(&storage.snapshot(), reference_date);
    print!("{}", format_coverage_report(&report));
    Ok(())
}

/// One-line coverage status printed after every change
pub fn print_coverage_status(storage: &Storage) {
    let report = coverage_report(&storage.snapshot(), today());
    let status = if report.shortfall { "SHORTFALL" } else { "covered" };

    println!(
        "Coverage {}: gross {} vs expected outflow {} ({})",
        report.year, report.yearly_gross, report.expected_outflow, status
    );
}
