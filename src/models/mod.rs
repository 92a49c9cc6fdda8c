//! Core data models for Tally
//!
//! This module contains the data structures of the freelance-income domain:
//! worked days, expenses, money amounts and the derived month/year summaries.

pub mod expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod state;
pub mod summary;
pub mod work_days;

pub use expense::{Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use state::{PersistedState, DEFAULT_DAILY_RATE};
pub use summary::{MonthSummary, SummaryTotal, YearSummary};
pub use work_days::WorkDays;
