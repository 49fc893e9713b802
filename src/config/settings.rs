//! User settings for Cash Ledger
//!
//! Stored as `config.json` in the base directory. Every field has a serde
//! default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::DEFAULT_DENOMINATIONS;

/// Settings layout written by this version
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// User settings for Cash Ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Layout version; files from a newer version are refused
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Face values shown in the counting table, in display order
    #[serde(default = "default_denominations")]
    pub denominations: Vec<u32>,

    /// User to act as when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    /// Whether creations and deletions are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_denominations() -> Vec<u32> {
    DEFAULT_DENOMINATIONS.to_vec()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            denominations: default_denominations(),
            default_owner: None,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            let settings = Settings::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject denomination lists that would make the ledger ambiguous
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.schema_version > SETTINGS_SCHEMA_VERSION {
            return Err(LedgerError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                self.schema_version, SETTINGS_SCHEMA_VERSION
            )));
        }
        if self.denominations.is_empty() {
            return Err(LedgerError::Config(
                "At least one denomination must be configured".into(),
            ));
        }
        if self.denominations.contains(&0) {
            return Err(LedgerError::Config(
                "Denominations must be positive".into(),
            ));
        }
        let mut seen = self.denominations.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.denominations.len() {
            return Err(LedgerError::Config(
                "Denominations must not repeat".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.denominations.first(), Some(&2000));
        assert_eq!(settings.denominations.len(), 10);
        assert!(settings.audit_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            default_owner: Some("asha".into()),
            denominations: vec![500, 100, 10],
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().join("fresh"));
        assert!(!paths.settings_file().exists());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(paths.settings_file().exists());

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"schema_version": 2}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_owner": "ravi"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_owner.as_deref(), Some("ravi"));
        assert_eq!(loaded.denominations, DEFAULT_DENOMINATIONS.to_vec());
    }

    #[test]
    fn test_invalid_denominations_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"denominations": [100, 0]}"#).unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));

        let settings = Settings {
            denominations: vec![10, 10],
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
