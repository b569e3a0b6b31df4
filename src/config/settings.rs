//! User settings
//!
//! Stored as `config.json` in the base directory. Missing fields fall back to
//! their defaults so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::BillbankPaths;
use crate::crypto::KdfParams;
use crate::error::{BillbankError, BillbankResult};
use crate::storage::write_json_atomic;

/// Currencies amounts can be entered in
pub const SUPPORTED_CURRENCIES: &[&str] = &["USD"];

/// Settings for protected record fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtectionSettings {
    /// Argon2 costs used when sealing new fields
    #[serde(default)]
    pub kdf: KdfParams,

    /// Argon2 PHC hash of the password, set the first time a field is sealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// strftime format for dates in listings
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub protection: ProtectionSettings,

    /// Terminal UI refresh interval
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            date_format: default_date_format(),
            protection: ProtectionSettings::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Settings {
    /// Load `config.json`, or defaults when it does not exist yet
    pub fn load_or_create(paths: &BillbankPaths) -> BillbankResult<Self> {
        let path = paths.settings_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| BillbankError::Io(format!("Failed to read settings file: {}", e)))?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BillbankError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, paths: &BillbankPaths) -> BillbankResult<()> {
        self.validate()?;
        write_json_atomic(paths.settings_file(), self)
    }

    pub fn validate(&self) -> BillbankResult<()> {
        if !SUPPORTED_CURRENCIES.contains(&self.currency.as_str()) {
            return Err(BillbankError::Config(format!(
                "Unsupported currency '{}' (supported: {})",
                self.currency,
                SUPPORTED_CURRENCIES.join(", ")
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(BillbankError::Config("tick_rate_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.tick_rate_ms, 250);
        assert!(settings.protection.password_hash.is_none());
        assert_eq!(settings.protection.kdf, KdfParams::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let paths = BillbankPaths::with_base_dir(dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_format = "%d/%m/%Y".into();
        settings.protection.password_hash = Some("$argon2id$stub".into());
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y");
        assert_eq!(loaded.protection.password_hash.as_deref(), Some("$argon2id$stub"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = BillbankPaths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"tick_rate_ms": 100}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.tick_rate_ms, 100);
        assert_eq!(loaded.currency, "USD");
    }

    #[test]
    fn test_unsupported_currency_rejected() {
        let dir = TempDir::new().unwrap();
        let paths = BillbankPaths::with_base_dir(dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency": "JPY"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BillbankError::Config(_)));
    }
}
