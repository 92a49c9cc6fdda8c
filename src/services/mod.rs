//! Service layer for tally
//!
//! Pure calculations (tax, calendar aggregation, expense coverage) live next
//! to the small services that apply user actions to storage.

pub mod calendar;
pub mod coverage;
pub mod expense;
pub mod rate;
pub mod tax;
pub mod workday;

pub use calendar::{summarize_all, summarize_month, summarize_year, yearly_gross};
pub use coverage::{
    compute_expected_outflow, coverage_ratio, coverage_report, is_shortfall, CoverageReport,
};
pub use expense::{ExpenseService, NewExpense};
pub use rate::RateService;
pub use tax::{compute_tax, TaxBreakdown};
pub use workday::{parse_date, WorkDayService};
