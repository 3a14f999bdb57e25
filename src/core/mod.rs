pub mod errors;
pub mod expense_book;
pub mod filter;
pub mod summary;
pub mod time;
pub mod utils;
pub mod validation;

pub use errors::{Result, TrackerError};
pub use expense_book::ExpenseBook;
pub use filter::{filter, ExpenseFilter};
pub use summary::{aggregate, CategoryTotal, Summary};
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::{Field, FieldStatus, ValidationReport, Validator};
