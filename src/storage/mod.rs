pub mod json_backend;
pub mod memory;
pub mod normalize;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{core::errors::TrackerError, domain::Expense};

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Key under which the expense collection is stored.
pub const STORAGE_KEY: &str = "expense-tracker:expenses";

/// A single-key blob store holding the serialized expense collection.
///
/// Backends only move raw text; `load` and `save` own the JSON format and the
/// normalization of whatever was found.
pub trait ExpenseStore: Send + Sync {
    /// Returns the stored blob, or `None` when nothing has been written yet.
    fn read_blob(&self) -> Result<Option<String>>;

    /// Replaces the stored blob.
    fn write_blob(&self, data: &str) -> Result<()>;

    /// Human-readable location used in log and shell messages.
    fn location(&self) -> String;

    /// Loads the collection, falling back to an empty one on any read or parse problem.
    fn load(&self, today: NaiveDate) -> Vec<Expense> {
        match self.read_blob() {
            Ok(Some(raw)) => {
                let expenses = normalize::parse_collection(&raw, today);
                debug!(
                    count = expenses.len(),
                    location = %self.location(),
                    "loaded expenses"
                );
                expenses
            }
            Ok(None) => {
                debug!(location = %self.location(), "no stored expenses");
                Vec::new()
            }
            Err(err) => {
                warn!(location = %self.location(), error = %err, "unable to read expenses; starting empty");
                Vec::new()
            }
        }
    }

    /// Serializes and overwrites the whole collection.
    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        self.write_blob(&json)?;
        debug!(count = expenses.len(), location = %self.location(), "saved expenses");
        Ok(())
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
