//! Where billbank keeps its files
//!
//! ## Path Resolution Order
//!
//! 1. `BILLBANK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory plus `billbank`
//!    (`~/.config/billbank` on Linux, `%APPDATA%\billbank` on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{BillbankError, BillbankResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BILLBANK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct BillbankPaths {
    base_dir: PathBuf,
}

impl BillbankPaths {
    /// Resolve the base directory from the environment or the platform default
    pub fn new() -> BillbankResult<Self> {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => Ok(Self::with_base_dir(PathBuf::from(custom))),
            _ => {
                let dirs = BaseDirs::new().ok_or_else(|| {
                    BillbankError::Config("Could not determine the home directory".into())
                })?;
                Ok(Self::with_base_dir(dirs.config_dir().join("billbank")))
            }
        }
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// One JSON file per record type lives here
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn bills_file(&self) -> PathBuf {
        self.data_dir().join("bills.json")
    }

    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn cards_file(&self) -> PathBuf {
        self.data_dir().join("cards.json")
    }

    pub fn transfers_file(&self) -> PathBuf {
        self.data_dir().join("transfers.json")
    }

    pub fn ensure_directories(&self) -> BillbankResult<()> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            BillbankError::Io(format!(
                "Failed to create data directory {}: {}",
                self.data_dir().display(),
                e
            ))
        })
    }

    /// `init` has been run (the settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
