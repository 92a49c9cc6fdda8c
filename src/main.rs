use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use tally::cli::{
    handle_backup_command, handle_coverage_command, handle_day_command, handle_expense_command,
    handle_month_command, handle_rate_command, handle_year_command,
};
use tally::config::{Settings, TallyPaths};
use tally::logging::{init_logging, resolve_directive, LogOptions, LOG_ENV};
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Freelance income tracker",
    long_about = "Tally records the days you worked, turns them into gross and net \
                  income under the flat-tax regime, and tells you whether this \
                  year's income covers the expenses you still have to pay."
)]
struct Cli {
    /// Base directory for data, backups and settings
    #[arg(long, global = true, env = "TALLY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace or a full directive)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Work day commands
    #[command(subcommand)]
    Day(tally::cli::DayCommands),

    /// Show income stats for a month (default: current month)
    Month {
        /// Month (YYYY-MM)
        month: Option<String>,
    },

    /// Show the per-month income table for a year
    Year {
        /// Year (default: current year)
        year: Option<i32>,
        /// Include every recorded month, across years
        #[arg(short, long)]
        all: bool,
    },

    /// Expense management commands
    #[command(subcommand)]
    Expense(tally::cli::ExpenseCommands),

    /// Check whether the year's income covers upcoming expenses and taxes
    Coverage {
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Daily rate commands
    #[command(subcommand)]
    Rate(tally::cli::RateCommands),

    /// Backup and restore commands
    #[command(subcommand)]
    Backup(tally::cli::BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => TallyPaths::with_base_dir(dir),
        None => TallyPaths::new()?,
    };
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let env_level = std::env::var(LOG_ENV).ok();
    let log_file = paths.log_file();
    init_logging(&LogOptions {
        directive: resolve_directive(
            cli.log_level.as_deref(),
            env_level.as_deref(),
            &settings.log_level,
        ),
        file: settings.log_to_file.then_some(log_file.as_path()),
    })?;
    debug!(base_dir = %paths.base_dir().display(), "starting");

    let storage = Storage::open(&paths)?;

    match cli.command {
        Some(Commands::Day(cmd)) => handle_day_command(&storage, &settings, cmd)?,
        Some(Commands::Month { month }) => handle_month_command(&storage, month)?,
        Some(Commands::Year { year, all }) => handle_year_command(&storage, year, all)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Coverage { as_of }) => handle_coverage_command(&storage, as_of)?,
        Some(Commands::Rate(cmd)) => handle_rate_command(&storage, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, &storage, cmd)?,
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Date format:           {}", settings.date_format);
            println!("  Log level:             {}", settings.log_level);
            println!("  Log to file:           {}", settings.log_to_file);
            println!("  Backup before restore: {}", settings.backup_before_restore);
            println!();
            println!("Daily rate: {}", storage.load_daily_rate());
        }
        None => {
            println!("Tally - freelance income tracker");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally day mark 2025-04-01' to record a worked day.");
        }
    }

    Ok(())
}
