//! Backup and restore for tally
//!
//! - `codec`: the portable JSON document (`exportedAt`, `dailyRate`,
//!   `workDays`, `expenses`) and its validation
//! - `BackupManager`: writes and lists backup files
//! - `RestoreManager`: validates backup files and restores them
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::backup::{BackupManager, RestoreManager};
//! use tally::config::TallyPaths;
//! use tally::storage::Storage;
//!
//! let paths = TallyPaths::new()?;
//! let storage = Storage::open(&paths)?;
//!
//! let backup_path = BackupManager::new(&paths).export(&storage)?;
//!
//! // Later, restore from backup
//! let result = RestoreManager::new(&storage).restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

pub mod codec;
mod manager;
mod restore;

pub use codec::{BackupDocument, RestoredBackup};
pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
