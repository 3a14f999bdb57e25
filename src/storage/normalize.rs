//! Lenient decoding of stored expense blobs.
//!
//! Stored data may have been written by older builds or edited by hand, so
//! every field is coerced instead of rejected: a blob that is not a JSON array
//! yields an empty collection, and each record is repaired field by field.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{generate_id, Expense, DEFAULT_CATEGORY};

/// Parses a stored blob into expenses, never failing.
pub fn parse_collection(raw: &str, today: NaiveDate) -> Vec<Expense> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "stored expenses are not valid JSON; ignoring");
            return Vec::new();
        }
    };
    let Value::Array(records) = value else {
        warn!("stored expenses are not a list; ignoring");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| {
            let mut expense = normalize_record(record, today);
            if !seen.insert(expense.id.clone()) {
                warn!(id = %expense.id, "duplicate expense id; assigning a new one");
                expense.id = generate_id();
                seen.insert(expense.id.clone());
            }
            expense
        })
        .collect()
}

/// Repairs a single stored record. Non-object values are treated as empty records.
pub fn normalize_record(record: &Value, today: NaiveDate) -> Expense {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    Expense {
        id: text_field(fields.get("id")).unwrap_or_else(generate_id),
        amount: amount_field(fields.get("amount")),
        category: text_field(fields.get("category"))
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        date: date_field(fields.get("date")).unwrap_or(today),
        description: text_field(fields.get("description")).unwrap_or_default(),
    }
}

/// Reads a scalar as text. Empty strings, zero, `false`, null and containers count as missing.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().map_or(true, |n| n != 0.0) => {
            Some(number.to_string())
        }
        Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}

/// Coerces an amount to a finite number, defaulting to 0.
fn amount_field(value: Option<&Value>) -> f64 {
    let coerced = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if coerced.is_finite() {
        coerced
    } else {
        0.0
    }
}

/// Accepts `YYYY-MM-DD`, or the date part of an ISO timestamp.
fn date_field(value: Option<&Value>) -> Option<NaiveDate> {
    let text = value?.as_str()?.trim();
    let day = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
    }

    #[test]
    fn missing_fields_get_defaults() {
        let expense = normalize_record(&json!({}), today());
        assert_eq!(expense.id.len(), 32);
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.category, "Other");
        assert_eq!(expense.date, today());
        assert_eq!(expense.description, "");
    }

    #[test]
    fn scalar_fields_are_coerced() {
        let expense = normalize_record(
            &json!({"id": 42, "amount": "12.75", "category": 7, "date": "2024-01-02T10:00:00Z", "description": true}),
            today(),
        );
        assert_eq!(expense.id, "42");
        assert_eq!(expense.amount, 12.75);
        assert_eq!(expense.category, "7");
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(expense.description, "true");
    }

    #[test]
    fn junk_amounts_become_zero() {
        for raw in [json!("abc"), json!(null), json!([1]), json!({"v": 1}), json!(false)] {
            let expense = normalize_record(&json!({ "amount": raw }), today());
            assert_eq!(expense.amount, 0.0, "amount {raw:?}");
        }
        let expense = normalize_record(&json!({ "amount": true }), today());
        assert_eq!(expense.amount, 1.0);
    }

    #[test]
    fn falsy_ids_are_regenerated() {
        for raw in [json!(""), json!(0), json!(false), json!(null)] {
            let expense = normalize_record(&json!({ "id": raw }), today());
            assert_eq!(expense.id.len(), 32, "id {raw:?}");
        }
    }

    #[test]
    fn unparsable_date_falls_back_to_today() {
        let expense = normalize_record(&json!({"date": "31/12/2023"}), today());
        assert_eq!(expense.date, today());
    }

    #[test]
    fn non_array_blobs_are_empty() {
        assert!(parse_collection("{}", today()).is_empty());
        assert!(parse_collection("\"text\"", today()).is_empty());
        assert!(parse_collection("{broken", today()).is_empty());
        assert!(parse_collection("null", today()).is_empty());
    }

    #[test]
    fn non_object_elements_become_default_records() {
        let expenses = parse_collection("[1, null]", today());
        assert_eq!(expenses.len(), 2);
        assert!(expenses.iter().all(|e| e.category == "Other"));
    }

    #[test]
    fn duplicate_ids_are_made_unique() {
        let expenses = parse_collection(r#"[{"id":"same"},{"id":"same"}]"#, today());
        assert_eq!(expenses[0].id, "same");
        assert_ne!(expenses[1].id, "same");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let expenses = parse_collection(
            r#"[{"id":"a","amount":5,"category":"Food","date":"2024-02-02","description":"x","tags":["y"]}]"#,
            today(),
        );
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, 5.0);
        assert_eq!(expenses[0].description, "x");
    }
}
