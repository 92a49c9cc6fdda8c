//! Daily rate CLI commands

use clap::Subcommand;

use crate::error::TallyResult;
use crate::services::RateService;
use crate::storage::Storage;

use super::report::print_coverage_status;

/// Rate subcommands
#[derive(Subcommand)]
pub enum RateCommands {
    /// Show the current daily rate
    Show,
    /// Change the daily rate
    Set {
        /// New rate (e.g., "250" or "250,50")
        value: String,
    },
}

/// Handle a rate command
pub fn handle_rate_command(storage: &Storage, cmd: RateCommands) -> TallyResult<()> {
    let service = RateService::new(storage);

    match cmd {
        RateCommands::Show => {
            println!("Daily rate: {}", service.get());
        }
        RateCommands::Set { value } => {
            let rate = service.set_from_input(&value)?;
            println!("Daily rate set to {}", rate);
            print_coverage_status(storage);
        }
    }

    Ok(())
}
