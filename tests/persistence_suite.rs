mod common;

use std::fs;

use common::{date, draft, open_book, setup_test_dir, today};
use expense_tracker::{
    core::{errors::TrackerError, filter::ExpenseFilter},
    domain::DEFAULT_CATEGORY,
    storage::{ExpenseStore, JsonStorage, STORAGE_KEY},
};
use serde_json::Value;

#[test]
fn added_expenses_survive_reopen() {
    let base = setup_test_dir();
    let mut book = open_book(&base);
    book.add(&draft(100.0, "Food", date(2024, 6, 1), "groceries"))
        .unwrap();
    book.add(&draft(30.0, "Travel", date(2024, 6, 2), "")).unwrap();
    let before = book.expenses().to_vec();

    let reopened = open_book(&base);
    assert_eq!(reopened.expenses(), before.as_slice());
}

#[test]
fn blob_lives_under_canonical_file_name() {
    let base = setup_test_dir();
    let mut book = open_book(&base);
    book.add(&draft(5.0, "Food", today(), "")).unwrap();

    let path = base.join("expense-tracker_expenses.json");
    let json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let records = json.as_array().expect("stored as a list");
    assert_eq!(records.len(), 1);
    for key in ["id", "amount", "category", "date", "description"] {
        assert!(records[0].get(key).is_some(), "missing {key}");
    }
    assert_eq!(records[0]["date"], "2024-06-30");
    assert_eq!(
        JsonStorage::new(Some(base.clone()), Some(STORAGE_KEY))
            .unwrap()
            .path(),
        base.join("expense-tracker_expenses.json")
    );
}

#[test]
fn malformed_records_are_repaired_on_load() {
    let base = setup_test_dir();
    let blob = r#"[
        {"id": "a1", "amount": "12.5", "category": "Food", "date": "2024-01-02"},
        {"id": "a2", "date": "not a date"},
        {"id": "a1", "amount": 3, "category": "Bills", "date": "2024-02-01", "extra": true}
    ]"#;
    fs::write(base.join("expense-tracker_expenses.json"), blob).unwrap();

    let book = open_book(&base);
    let items = book.expenses();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].amount, 12.5);
    assert_eq!(items[1].category, DEFAULT_CATEGORY);
    assert_eq!(items[1].amount, 0.0);
    assert_eq!(items[1].date, today());
    assert_eq!(items[1].description, "");
    assert_ne!(items[2].id, "a1");
    assert_eq!(items[2].category, "Bills");
}

#[test]
fn non_list_blob_loads_empty() {
    let base = setup_test_dir();
    fs::write(base.join("expense-tracker_expenses.json"), r#"{"id":"x"}"#).unwrap();
    assert!(open_book(&base).is_empty());

    fs::write(base.join("expense-tracker_expenses.json"), "garbage").unwrap();
    assert!(open_book(&base).is_empty());
}

#[test]
fn rejected_draft_writes_nothing() {
    let base = setup_test_dir();
    let mut book = open_book(&base);
    let err = book
        .add(&draft(0.0, "Food", date(2024, 7, 1), ""))
        .unwrap_err();
    match err {
        TrackerError::Validation(report) => {
            assert!(!report.amount.is_valid());
            assert!(report.category.is_valid());
            assert!(!report.date.is_valid());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(!base.join("expense-tracker_expenses.json").exists());
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let base = setup_test_dir();
    let mut book = open_book(&base);
    book.add(&draft(9.0, "Food", today(), "")).unwrap();
    let path = base.join("expense-tracker_expenses.json");
    let before = fs::read_to_string(&path).unwrap();

    assert!(book.delete("missing").unwrap().is_none());
    assert_eq!(book.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn delete_persists_removal() {
    let base = setup_test_dir();
    let mut book = open_book(&base);
    let id = book.add(&draft(9.0, "Food", today(), "")).unwrap().id.clone();
    book.add(&draft(4.0, "Bills", today(), "")).unwrap();

    book.delete(&id).unwrap();
    let reopened = open_book(&base);
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(&id).is_none());
    assert_eq!(reopened.view(&ExpenseFilter::default())[0].category, "Bills");
}

#[test]
fn failed_write_leaves_previous_file_intact() {
    let base = setup_test_dir();
    let storage = JsonStorage::new(Some(base.clone()), None).unwrap();
    storage.write_blob("[]").unwrap();

    let tmp = base.join("expense-tracker_expenses.json.tmp");
    fs::create_dir_all(&tmp).unwrap();
    assert!(storage.write_blob(r#"[{"id":"z"}]"#).is_err());
    assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");
}
