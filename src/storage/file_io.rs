//! Whole-file JSON helpers for the on-disk store
//!
//! Each stored key is one small JSON file. Writes go through a sibling
//! `.json.tmp` file that is synced and renamed over the target, so a crash
//! leaves either the old value or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TallyError;

fn storage_error(action: &str, path: &Path, cause: impl std::fmt::Display) -> TallyError {
    TallyError::Storage(format!("Cannot {} {}: {}", action, path.display(), cause))
}

/// Decode the JSON file at `path`; a missing file is `Ok(None)`
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, TallyError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| storage_error("decode", path, e))
}

/// Replace the file at `path` with `data` as pretty JSON
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    // must share a filesystem with the target for the rename
    let staging = path.with_extension("json.tmp");

    let written = File::create(&staging)
        .map_err(|e| storage_error("create", &staging, e))
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, data)
                .map_err(|e| storage_error("encode", &staging, e))?;
            out.flush().map_err(|e| storage_error("flush", &staging, e))?;
            out.get_ref()
                .sync_all()
                .map_err(|e| storage_error("sync", &staging, e))
        })
        .and_then(|()| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

/// Delete `path`; a file that is already gone counts as deleted
pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<(), TallyError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(storage_error("remove", path, e)),
        _ => Ok(()),
    }
}
