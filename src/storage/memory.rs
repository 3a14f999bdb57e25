use std::sync::RwLock;

use crate::core::errors::TrackerError;

use super::{ExpenseStore, Result};

/// Keeps the blob in memory; the closest analogue to a browser's local storage slot.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RwLock<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `raw` already stored, whatever it contains.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(raw.into())),
        }
    }

    pub fn snapshot(&self) -> Option<String> {
        self.blob.read().ok().and_then(|guard| guard.clone())
    }
}

impl ExpenseStore for MemoryStorage {
    fn read_blob(&self) -> Result<Option<String>> {
        self.blob
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| TrackerError::Storage("memory store lock poisoned".into()))
    }

    fn write_blob(&self, data: &str) -> Result<()> {
        let mut guard = self
            .blob
            .write()
            .map_err(|_| TrackerError::Storage("memory store lock poisoned".into()))?;
        *guard = Some(data.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}
