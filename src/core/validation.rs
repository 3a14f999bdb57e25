//! Field-level validation of expense input.

use std::fmt;

use chrono::NaiveDate;

use crate::core::time::{end_of_day, start_of_day};
use crate::domain::ExpenseDraft;

/// Input fields checked before an expense is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Category,
    Date,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        }
    }

    /// Hint shown next to a flagged field.
    pub fn hint(self) -> &'static str {
        match self {
            Field::Amount => "enter a number greater than 0",
            Field::Category => "choose or type a category",
            Field::Date => "use a valid YYYY-MM-DD date no later than today",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Invalid,
}

impl FieldStatus {
    fn from_ok(ok: bool) -> Self {
        if ok {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        }
    }

    pub fn is_valid(self) -> bool {
        self == FieldStatus::Valid
    }
}

/// Outcome of validating one draft; every field is always evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub amount: FieldStatus,
    pub category: FieldStatus,
    pub date: FieldStatus,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.amount.is_valid() && self.category.is_valid() && self.date.is_valid()
    }

    pub fn status(&self, field: Field) -> FieldStatus {
        match field {
            Field::Amount => self.amount,
            Field::Category => self.category,
            Field::Date => self.date,
        }
    }

    /// Flagged fields in form order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        [Field::Amount, Field::Category, Field::Date]
            .into_iter()
            .filter(|field| !self.status(*field).is_valid())
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flagged = self.invalid_fields();
        if flagged.is_empty() {
            return f.write_str("all fields valid");
        }
        let parts: Vec<String> = flagged
            .iter()
            .map(|field| format!("{} ({})", field, field.hint()))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

pub struct Validator;

impl Validator {
    /// Checks amount, category, and date independently against `today`.
    pub fn validate(draft: &ExpenseDraft, today: NaiveDate) -> ValidationReport {
        let amount = Self::check_amount(draft.amount);
        let category = Self::check_category(&draft.category);
        let date = Self::check_date(draft.date, today);
        ValidationReport {
            amount: FieldStatus::from_ok(amount),
            category: FieldStatus::from_ok(category),
            date: FieldStatus::from_ok(date),
        }
    }

    pub fn check_amount(amount: f64) -> bool {
        amount.is_finite() && amount > 0.0
    }

    pub fn check_category(category: &str) -> bool {
        !category.is_empty()
    }

    pub fn check_date(date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match date {
            Some(date) => start_of_day(date) <= end_of_day(today),
            None => false,
        }
    }
}
