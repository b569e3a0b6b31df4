//! JSON file helpers
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! crash never leaves a half-written data file behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{BillbankError, BillbankResult};

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> BillbankError {
    BillbankError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from `path`, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> BillbankResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write JSON to `path` atomically, creating parent directories
pub fn write_json_atomic<T, P>(path: P, data: &T) -> BillbankResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize, Default)]
    struct Sample {
        names: Vec<String>,
    }

    #[test]
    fn test_missing_file_reads_default() {
        let dir = TempDir::new().unwrap();
        let sample: Sample = read_json(dir.path().join("absent.json")).unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("bills.json");
        let sample = Sample {
            names: vec!["Rent".into(), "Power".into()],
        };

        write_json_atomic(&path, &sample).unwrap();
        assert!(!dir.path().join("nested").join("bills.json.tmp").exists());
        assert_eq!(read_json::<Sample, _>(&path).unwrap(), sample);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bills.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Sample, _>(&path).unwrap_err();
        assert!(matches!(err, BillbankError::Storage(_)));
        assert!(err.to_string().contains("parse"));
    }
}
