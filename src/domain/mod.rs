pub mod common;
pub mod expense;

pub use common::{Amounted, Displayable, Identifiable};
pub use expense::{generate_id, Expense, ExpenseDraft, DEFAULT_CATEGORY, PRESET_CATEGORIES};
