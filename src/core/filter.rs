//! Category and date-range filtering of the expense collection.

use std::fmt;

use chrono::NaiveDate;

use crate::core::time::{end_of_day, start_of_day};
use crate::domain::Expense;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Current filter selection. Every field is optional; an empty filter shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn new(category: Option<&str>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let mut filter = Self {
            category: None,
            from,
            to,
        };
        filter.set_category(category);
        filter
    }

    /// Sets the category filter; `"all"` or an empty name clears it.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category
            .filter(|value| !value.is_empty() && *value != ALL_CATEGORIES)
            .map(str::to_string);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.from.is_some() || self.to.is_some()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category.as_deref() {
            if expense.category != category {
                return false;
            }
        }
        let when = start_of_day(expense.date);
        if let Some(from) = self.from {
            if when < start_of_day(from) {
                return false;
            }
        }
        if let Some(to) = self.to {
            if when > end_of_day(to) {
                return false;
            }
        }
        true
    }

    /// Returns the matching expenses, most recent first.
    pub fn apply(&self, all: &[Expense]) -> Vec<Expense> {
        let mut items: Vec<Expense> = all
            .iter()
            .filter(|expense| self.matches(expense))
            .cloned()
            .collect();
        sort_recent_first(&mut items);
        items
    }
}

impl fmt::Display for ExpenseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.category.as_deref().unwrap_or(ALL_CATEGORIES);
        let from = self
            .from
            .map(|date| date.to_string())
            .unwrap_or_else(|| "any".into());
        let to = self
            .to
            .map(|date| date.to_string())
            .unwrap_or_else(|| "any".into());
        write!(f, "category: {category}, from: {from}, to: {to}")
    }
}

/// Free-function form of [`ExpenseFilter::apply`].
pub fn filter(
    all: &[Expense],
    category: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Expense> {
    ExpenseFilter::new(category, from, to).apply(all)
}

/// Stable sort by date descending; equal dates keep their relative order.
pub fn sort_recent_first(items: &mut [Expense]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}
