//! Tally - freelance income tracker
//!
//! Tracks worked days at a fixed daily rate, derives gross and net income
//! under a flat-tax regime, checks whether the year's income covers planned
//! expenses, and backs up or restores everything as one JSON document.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data types (money, months, worked days, expenses)
//! - `storage`: Key-value store and the typed facade over it
//! - `services`: Tax, calendar aggregation, expense coverage and user actions
//! - `backup`: Backup document codec, export and restore
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `logging`: Subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::{TallyPaths, Settings};
//! use tally::services::coverage_report;
//! use tally::storage::Storage;
//!
//! let paths = TallyPaths::new()?;
//! let storage = Storage::open(&paths)?;
//! let report = coverage_report(&storage.snapshot(), chrono::Local::now().date_naive());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
