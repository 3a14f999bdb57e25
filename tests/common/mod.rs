#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use expense_tracker::{
    core::{expense_book::ExpenseBook, time::FixedClock},
    domain::ExpenseDraft,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Reference "today" shared by the integration suites.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Creates a unique data directory that outlives the calling test.
pub fn setup_test_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a file-backed book in `base` with the clock pinned to [`today`].
pub fn open_book(base: &std::path::Path) -> ExpenseBook {
    let storage =
        JsonStorage::new(Some(base.to_path_buf()), None).expect("create json storage backend");
    ExpenseBook::open_with_clock(Box::new(storage), Box::new(FixedClock::on(today())))
}

pub fn draft(amount: f64, category: &str, on: NaiveDate, description: &str) -> ExpenseDraft {
    ExpenseDraft::new(amount, category, Some(on), description)
}
