//! Backup restoration for tally
//!
//! Restoring replaces the whole persisted state. The file is decoded and
//! validated in full before storage is touched; only then is the store
//! cleared and rewritten.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::Money;
use crate::storage::Storage;

use super::codec::{self, RestoredBackup};

/// Handles restoring from backups
pub struct RestoreManager<'a> {
    storage: &'a Storage,
}

impl<'a> RestoreManager<'a> {
    /// Create a new RestoreManager
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Restore data from a backup file
    ///
    /// This overwrites the rate, worked days and expenses with the backup
    /// contents. Nothing is merged with the current state.
    pub fn restore_from_file(&self, backup_path: &Path) -> TallyResult<RestoreResult> {
        let restored = match read_backup(backup_path) {
            Ok(restored) => restored,
            Err(error) => {
                warn!(path = %backup_path.display(), %error, "backup rejected, state unchanged");
                return Err(error);
            }
        };

        self.storage.replace_all(&restored.state)?;

        let result = RestoreResult::from(&restored);
        info!(
            path = %backup_path.display(),
            work_days = result.work_days,
            expenses = result.expenses,
            "restored backup"
        );
        Ok(result)
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> TallyResult<ValidationResult> {
        let restored = read_backup(backup_path)?;
        Ok(ValidationResult {
            exported_at: restored.exported_at,
            daily_rate: restored.state.daily_rate,
            work_days: restored.state.work_days.worked_count(),
            expenses: restored.state.expenses.len(),
        })
    }
}

fn read_backup(path: &Path) -> TallyResult<RestoredBackup> {
    let contents = fs::read_to_string(path).map_err(|e| {
        TallyError::Io(format!("Failed to read backup file {}: {}", path.display(), e))
    })?;
    codec::decode(&contents)
}

/// Result of a restore operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    /// When the backup was exported, if recorded
    pub exported_at: Option<DateTime<Utc>>,
    pub daily_rate: Money,
    pub work_days: usize,
    pub expenses: usize,
}

impl From<&RestoredBackup> for RestoreResult {
    fn from(restored: &RestoredBackup) -> Self {
        Self {
            exported_at: restored.exported_at,
            daily_rate: restored.state.daily_rate,
            work_days: restored.state.work_days.worked_count(),
            expenses: restored.state.expenses.len(),
        }
    }
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored: daily rate {}, {} work days, {} expenses",
            self.daily_rate, self.work_days, self.expenses
        )
    }
}

/// Result of validating a backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub exported_at: Option<DateTime<Utc>>,
    pub daily_rate: Money,
    pub work_days: usize,
    pub expenses: usize,
}

impl ValidationResult {
    /// Get a summary of what the backup contains
    pub fn summary(&self) -> String {
        let exported = self
            .exported_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        format!(
            "Valid backup from {}: daily rate {}, {} work days, {} expenses",
            exported, self.daily_rate, self.work_days, self.expenses
        )
    }
}
