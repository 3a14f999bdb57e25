use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};

use super::{ExpenseStore, Result, STORAGE_KEY};

const TMP_SUFFIX: &str = "tmp";

/// File-backed store: one JSON file per storage key under the data directory.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    root: PathBuf,
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, key: Option<&str>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let path = PathResolver::blob_file_in(&root, key.unwrap_or(STORAGE_KEY));
        Ok(Self { root, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl ExpenseStore for JsonStorage {
    fn read_blob(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write_blob(&self, data: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage");
        (storage, temp)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let items = vec![
            Expense::new(9.99, "Food", today(), "snacks, \"salty\""),
            Expense::new(120.0, "Bills", today(), ""),
        ];
        storage.save(&items).expect("save");
        assert_eq!(storage.load(today()), items);
        assert!(!tmp_path(storage.path()).exists());
    }

    #[test]
    fn missing_file_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.read_blob().expect("read").is_none());
        assert!(storage.load(today()).is_empty());
    }

    #[test]
    fn file_name_follows_storage_key() {
        let (storage, guard) = storage_with_temp_dir();
        assert_eq!(
            storage.path(),
            guard.path().join("expense-tracker_expenses.json")
        );
    }

    #[test]
    fn corrupted_file_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.path(), "{{{").unwrap();
        assert!(storage.load(today()).is_empty());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let path = PathBuf::from("/data/expenses.json");
        assert_eq!(tmp_path(&path), PathBuf::from("/data/expenses.json.tmp"));
    }
}
