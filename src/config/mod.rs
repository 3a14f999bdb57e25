use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    core::{
        errors::TrackerError,
        utils::{ensure_dir, PathResolver},
    },
    domain::PRESET_CATEGORIES,
    storage::json_backend::{tmp_path, write_atomic},
};

const DEFAULT_EXPORT_FILE: &str = "expenses.csv";

/// User preferences persisted next to the expense data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Suggestions offered by the add wizard.
    pub categories: Vec<String>,
    pub plain_mode: bool,
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
    pub export_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            categories: PRESET_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            plain_mode: false,
            screen_reader_mode: false,
            high_contrast_mode: false,
            export_path: DEFAULT_EXPORT_FILE.into(),
        }
    }
}

impl Config {
    pub const KEYS: &'static [&'static str] = &[
        "locale",
        "currency",
        "categories",
        "plain_mode",
        "screen_reader_mode",
        "high_contrast_mode",
        "export_path",
    ];

    /// Updates one preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        match key.to_lowercase().as_str() {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_uppercase(),
            "categories" => {
                let categories: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                if categories.is_empty() {
                    return Err(TrackerError::Config(
                        "categories must list at least one name".into(),
                    ));
                }
                self.categories = categories;
            }
            "plain_mode" => self.plain_mode = parse_flag(key, value)?,
            "screen_reader_mode" => self.screen_reader_mode = parse_flag(key, value)?,
            "high_contrast_mode" => self.high_contrast_mode = parse_flag(key, value)?,
            "export_path" => self.export_path = non_empty(key, value)?,
            other => {
                return Err(TrackerError::Config(format!(
                    "unknown config key `{}`",
                    other
                )))
            }
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, TrackerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TrackerError::Config(format!("{key} cannot be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, TrackerError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(TrackerError::Config(format!(
            "{key} expects on/off, got `{value}`"
        ))),
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        ensure_dir(&base)?;
        let config_root = PathResolver::config_dir_in(&base);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the stored preferences; an unreadable file falls back to defaults.
    pub fn load(&self) -> Result<Config, TrackerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "config file is corrupt; using defaults"
                );
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency, "INR");
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency", "usd").unwrap();
        config.set("plain_mode", "on").unwrap();
        config.set("categories", "Rent, Food ,").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "USD");
        assert!(loaded.plain_mode);
        assert_eq!(loaded.categories, vec!["Rent", "Food"]);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency":"EUR"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.export_path, "expenses.csv");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "garbage").unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());

        let mut config = Config::default();
        config.set("currency", "eur").unwrap();
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap().currency, "EUR");
    }

    #[test]
    fn rejects_unknown_keys_and_bad_flags() {
        let mut config = Config::default();
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("plain_mode", "maybe").is_err());
        assert!(config.set("currency", "  ").is_err());
    }
}
