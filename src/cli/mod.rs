//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod day;
pub mod expense;
pub mod rate;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use day::{handle_day_command, DayCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use rate::{handle_rate_command, RateCommands};
pub use report::{handle_coverage_command, handle_month_command, handle_year_command};
