//! Backup manager for tally
//!
//! Writes backup documents into the backup directory and finds them again.
//! Files are named `backup-YYYYMMDD-HHMMSS-mmm.json` after their export time.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::paths::TallyPaths;
use crate::error::{TallyError, TallyResult};
use crate::storage::Storage;

use super::codec;

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates and lists backups
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &TallyPaths) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
        }
    }

    /// Export the current state into the backup directory
    ///
    /// Returns the path to the created backup file.
    pub fn export(&self, storage: &Storage) -> TallyResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| TallyError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let path = self.backup_dir.join(filename);

        write_backup(storage, &path, now)?;
        Ok(path)
    }

    /// Export the current state to an explicit path
    pub fn export_to(&self, storage: &Storage, path: &Path) -> TallyResult<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| TallyError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        write_backup(storage, path, Utc::now())?;
        Ok(path.to_path_buf())
    }

    /// List all backups in the backup directory, newest first
    pub fn list_backups(&self) -> TallyResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| TallyError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| TallyError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest_backup(&self) -> TallyResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Resolve `latest`, a filename in the backup directory, or any path
    pub fn resolve(&self, target: &str) -> TallyResult<PathBuf> {
        if target == "latest" {
            return self
                .latest_backup()?
                .map(|b| b.path)
                .ok_or_else(|| TallyError::backup_not_found("latest"));
        }

        let direct = PathBuf::from(target);
        if direct.exists() {
            return Ok(direct);
        }

        let in_dir = self.backup_dir.join(target);
        if in_dir.exists() {
            return Ok(in_dir);
        }

        Err(TallyError::backup_not_found(target))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }
}

fn write_backup(storage: &Storage, path: &Path, exported_at: DateTime<Utc>) -> TallyResult<()> {
    let state = storage.snapshot();
    let document = codec::serialize(&state, exported_at);
    let json = codec::encode(&document)?;

    fs::write(path, json)
        .map_err(|e| TallyError::Io(format!("Failed to write backup file: {}", e)))?;

    info!(
        path = %path.display(),
        work_days = document.work_days.worked_count(),
        expenses = document.expenses.len(),
        "exported backup"
    );
    Ok(())
}

/// Parse backup info from a backup file
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let Some(created_at) = parse_backup_timestamp(date_part) else {
        debug!(%filename, "skipping file with unrecognised backup name");
        return None;
    };

    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // YYYYMMDD-HHMMSS, optionally followed by -mmm
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = match parts.get(2) {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }
    // slicing below is by byte offset
    if !date_part.bytes().chain(time_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(
        chrono::NaiveDateTime::new(date, time),
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, WorkDays};
    use chrono::Datelike;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let storage = Storage::open(&paths).unwrap();
        (BackupManager::new(&paths), storage, temp_dir)
    }

    #[test]
    fn test_export() {
        let (manager, storage, _temp) = create_test_manager();
        storage.save_daily_rate(Money::new(dec!(250))).unwrap();

        let path = manager.export(&storage).unwrap();
        assert!(path.exists());
        assert!(path.to_string_lossy().contains("backup-"));

        let restored = codec::decode(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.state.daily_rate, Money::new(dec!(250)));
        assert!(restored.exported_at.is_some());
    }

    #[test]
    fn test_export_to_explicit_path() {
        let (manager, storage, temp) = create_test_manager();
        storage
            .save_work_days(&WorkDays::from_dates([
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
            ]))
            .unwrap();

        let target = temp.path().join("exports").join("mine.json");
        let path = manager.export_to(&storage, &target).unwrap();

        assert_eq!(path, target);
        let restored = codec::decode(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.state.work_days.worked_count(), 1);
        // not a managed backup
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_list_backups() {
        let (manager, storage, _temp) = create_test_manager();

        manager.export(&storage).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        manager.export(&storage).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at >= backups[1].created_at);
        assert!(backups[0].size_bytes > 0);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let (manager, _storage, _temp) = create_test_manager();
        fs::write(manager.backup_dir().join("notes.json"), "{}").unwrap();
        fs::write(manager.backup_dir().join("backup-garbage.json"), "{}").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_backup_name_ignored() {
        let (manager, _storage, _temp) = create_test_manager();
        // eight bytes, but 'é' straddles a slice boundary
        fs::write(manager.backup_dir().join("backup-202é011-143022.json"), "{}").unwrap();
        fs::write(manager.backup_dir().join("backup-20251127-14é2022.json"), "{}").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
        assert!(parse_backup_timestamp("202é011-143022").is_none());
        assert!(parse_backup_timestamp("+2025112-143022").is_none());
    }

    #[test]
    fn test_latest_and_resolve() {
        let (manager, storage, _temp) = create_test_manager();

        assert!(manager.latest_backup().unwrap().is_none());
        assert!(manager.resolve("latest").unwrap_err().is_not_found());

        let path = manager.export(&storage).unwrap();
        assert_eq!(manager.latest_backup().unwrap().unwrap().path, path);
        assert_eq!(manager.resolve("latest").unwrap(), path);

        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(manager.resolve(&filename).unwrap(), path);
        assert!(manager.resolve("missing.json").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);

        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("20251327-143022").is_none());
        assert!(parse_backup_timestamp("2025-11-27").is_none());
    }

    #[test]
    fn test_empty_backup_dir() {
        let (manager, _storage, _temp) = create_test_manager();
        assert!(manager.list_backups().unwrap().is_empty());
    }
}
