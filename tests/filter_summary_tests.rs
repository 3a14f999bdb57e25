mod common;

use common::date;
use expense_tracker::{
    core::{aggregate, filter, time::FixedClock, validation::Validator},
    domain::{Expense, ExpenseDraft},
};
use expense_tracker::core::Clock;

fn sample() -> Vec<Expense> {
    vec![
        Expense::new(100.0, "Food", date(2024, 3, 1), ""),
        Expense::new(50.0, "Food", date(2024, 3, 3), ""),
        Expense::new(30.0, "Travel", date(2024, 3, 2), ""),
        Expense::new(20.0, "Bills", date(2024, 3, 3), ""),
    ]
}

#[test]
fn all_returns_everything_most_recent_first() {
    let items = filter(&sample(), Some("all"), None, None);
    let amounts: Vec<f64> = items.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![50.0, 20.0, 30.0, 100.0]);
}

#[test]
fn category_filter_is_exact() {
    let items = filter(&sample(), Some("Food"), None, None);
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|e| e.category == "Food"));
    assert!(filter(&sample(), Some("food"), None, None).is_empty());
}

#[test]
fn date_range_is_inclusive() {
    let items = filter(&sample(), None, Some(date(2024, 3, 2)), Some(date(2024, 3, 2)));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Travel");

    let through_first = filter(&sample(), None, None, Some(date(2024, 3, 1)));
    assert_eq!(through_first.len(), 1);
}

#[test]
fn aggregate_matches_worked_example() {
    let items = vec![
        Expense::new(100.0, "Food", date(2024, 1, 1), ""),
        Expense::new(50.0, "Food", date(2024, 1, 2), ""),
        Expense::new(30.0, "Travel", date(2024, 1, 3), ""),
    ];
    let summary = aggregate(&items);
    assert_eq!(summary.total, 180.0);
    assert_eq!(summary.count, 3);
    assert_eq!(summary.category_total("Food"), Some(150.0));
    assert_eq!(summary.category_total("Travel"), Some(30.0));
    let top = summary.top.expect("top category");
    assert_eq!((top.category.as_str(), top.total), ("Food", 150.0));
}

#[test]
fn aggregate_of_nothing_has_no_top() {
    let summary = aggregate(&[]);
    assert_eq!(summary.total, 0.0);
    assert_eq!(summary.count, 0);
    assert!(summary.by_category.is_empty());
    assert!(summary.top.is_none());
}

#[test]
fn each_invalid_field_is_reported_independently() {
    let today = FixedClock::on(date(2024, 6, 30)).today();
    let valid = ExpenseDraft::new(10.0, "Food", Some(today), "");
    assert!(Validator::validate(&valid, today).is_valid());

    let bad_amount = ExpenseDraft { amount: -1.0, ..valid.clone() };
    let report = Validator::validate(&bad_amount, today);
    assert!(!report.amount.is_valid());
    assert!(report.category.is_valid() && report.date.is_valid());

    let bad_category = ExpenseDraft { category: String::new(), ..valid.clone() };
    let report = Validator::validate(&bad_category, today);
    assert!(!report.category.is_valid());
    assert!(report.amount.is_valid() && report.date.is_valid());

    let bad_date = ExpenseDraft { date: Some(date(2024, 7, 1)), ..valid };
    let report = Validator::validate(&bad_date, today);
    assert!(!report.date.is_valid());
    assert!(report.amount.is_valid() && report.category.is_valid());
}
