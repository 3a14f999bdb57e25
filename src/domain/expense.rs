//! Domain model for recorded expenses and the raw input used to create them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Category assigned when a stored record carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories suggested by the add wizard. Any other label is accepted too.
pub const PRESET_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Travel",
    "Other",
];

/// One recorded spending event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Expense {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            amount,
            category: category.into(),
            date,
            description: description.into(),
        }
    }

    /// Builds an expense from a draft that already passed validation.
    ///
    /// Returns `None` when the draft has no date, which validation rejects anyway.
    pub fn from_draft(draft: &ExpenseDraft) -> Option<Self> {
        let date = draft.date?;
        Some(Self::new(
            draft.amount,
            draft.category.clone(),
            date,
            draft.description.trim(),
        ))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl Identifiable for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} {} {:.2}", self.date, self.category, self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}

/// Unvalidated user input for a new expense.
///
/// `amount` keeps whatever the user typed coerced to a number, so NaN and
/// negative values survive until validation flags them. A `date` of `None`
/// means the input was empty or did not parse as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub description: String,
}

impl ExpenseDraft {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        date: Option<NaiveDate>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            description: description.into(),
        }
    }

    /// Coerces raw text fields the way form inputs are read.
    pub fn from_input(amount: &str, category: &str, date: &str, description: &str) -> Self {
        Self {
            amount: parse_amount(amount),
            category: category.trim().to_string(),
            date: NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok(),
            description: description.trim().to_string(),
        }
    }
}

/// Parses an amount field; blank input reads as zero and garbage as NaN.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns a fresh opaque identifier: 32 lowercase hex characters.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
