//! JSON file helpers with atomic writes
//!
//! A write either replaces the whole file or leaves the previous version in
//! place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

fn storage_err(context: impl std::fmt::Display, e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("{}: {}", context, e))
}

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| storage_err(format_args!("Failed to open {}", path.display()), e))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_err(format_args!("Failed to parse {}", path.display()), e))
}

/// Write JSON to a file atomically (write to a sibling temp file, sync, then
/// rename over the target)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            storage_err(
                format_args!("Failed to create directory {}", parent.display()),
                e,
            )
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let result = write_temp(&temp_path, data)
        .and_then(|()| {
            fs::rename(&temp_path, path).map_err(|e| storage_err("Failed to rename temp file", e))
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), LedgerError> {
    let file =
        File::create(temp_path).map_err(|e| storage_err("Failed to create temp file", e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("Failed to serialize data", e))?;
    writer
        .flush()
        .map_err(|e| storage_err("Failed to flush data", e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("Failed to sync data", e))
}
