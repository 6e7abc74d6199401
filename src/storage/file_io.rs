//! JSON file helpers
//!
//! Snapshots are only read. The settings file is written through a sibling
//! temp file and a rename, so a crash never leaves half a config behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ExpenseError;

/// Read a JSON document that must exist
///
/// A missing file is `NotFound`; unreadable JSON is a `Json` error naming
/// the file.
pub fn read_json_required<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ExpenseError::snapshot_not_found(path.display().to_string()));
    }

    let reader = File::open(path)
        .map(BufReader::new)
        .map_err(|e| ExpenseError::Storage(format!("Cannot open {}: {}", path.display(), e)))?;

    serde_json::from_reader(reader)
        .map_err(|e| ExpenseError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// `<name>.tmp` next to `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Pretty-print `data` to `path`, replacing it in one rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            ExpenseError::Storage(format!("Cannot create {}: {}", dir.display(), e))
        })?;
    }

    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path)
        .map_err(|e| {
            ExpenseError::Storage(format!("Cannot create {}: {}", temp_path.display(), e))
        })
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)
                .map_err(|e| ExpenseError::Storage(format!("Failed to serialize: {}", e)))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        })
        .and_then(|()| {
            fs::rename(&temp_path, path).map_err(|e| {
                ExpenseError::Storage(format!("Cannot replace {}: {}", path.display(), e))
            })
        });

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}
