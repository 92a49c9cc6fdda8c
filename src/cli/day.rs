//! Work day CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::format_date;
use crate::error::{TallyError, TallyResult};
use crate::models::MonthKey;
use crate::services::{parse_date, WorkDayService};
use crate::storage::Storage;

use super::report::print_coverage_status;

/// Work day subcommands
#[derive(Subcommand)]
pub enum DayCommands {
    /// Flip a day between worked and not worked
    Toggle {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Mark a day as worked
    Mark {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Clear a worked day
    Unmark {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// List worked days
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a work day command
pub fn handle_day_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DayCommands,
) -> TallyResult<()> {
    let service = WorkDayService::new(storage);

    match cmd {
        DayCommands::Toggle { date } => {
            let date = parse_date(&date)?;
            if service.toggle(date)? {
                println!("Marked {} as worked", date);
            } else {
                println!("Cleared {}", date);
            }
            print_coverage_status(storage);
        }

        DayCommands::Mark { date } => {
            let date = parse_date(&date)?;
            if service.mark(date)? {
                println!("Marked {} as worked", date);
                print_coverage_status(storage);
            } else {
                println!("{} is already marked as worked", date);
            }
        }

        DayCommands::Unmark { date } => {
            let date = parse_date(&date)?;
            if service.unmark(date)? {
                println!("Cleared {}", date);
                print_coverage_status(storage);
            } else {
                println!("{} was not marked as worked", date);
            }
        }

        DayCommands::List { month } => {
            let month = month
                .map(|m| MonthKey::parse(&m))
                .transpose()
                .map_err(|e| TallyError::InputValidation(e.to_string()))?;

            let dates = service.list(month);
            if dates.is_empty() {
                println!("No work days recorded.");
                return Ok(());
            }

            for date in &dates {
                println!(
                    "  {}  {}",
                    format_date(*date, &settings.date_format),
                    date.format("%a")
                );
            }
            println!();
            println!("Total: {} day(s)", dates.len());
        }
    }

    Ok(())
}
