use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::core::errors::TrackerError;

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout of the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.expense_tracker`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    /// File holding the blob stored under `key`.
    pub fn blob_file_in(base: &Path, key: &str) -> PathBuf {
        base.join(format!("{}.json", canonical_key(key)))
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), TrackerError> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Maps a storage key onto a file-name-safe stem.
pub fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_maps_to_file_stem() {
        assert_eq!(
            canonical_key("expense-tracker:expenses"),
            "expense-tracker_expenses"
        );
        assert_eq!(canonical_key("  :: "), "store");
    }

    #[test]
    fn blob_file_lives_under_base() {
        let base = PathBuf::from("/tmp/tracker");
        assert_eq!(
            PathResolver::blob_file_in(&base, "expense-tracker:expenses"),
            base.join("expense-tracker_expenses.json")
        );
    }
}
