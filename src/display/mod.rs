//! Display formatting for terminal output
//!
//! Turns computed summaries into the text printed by the CLI.

pub mod coverage;
pub mod expense;
pub mod report;
pub mod summary;

pub use coverage::format_coverage_report;
pub use expense::{format_expense_details, format_expense_list};
pub use summary::{format_month_summary, format_year_summary};
