//! Aggregate statistics over a (filtered) set of expenses.

use crate::domain::{Amounted, Expense};

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Totals derived from a list of expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    /// Per-category sums in order of first appearance.
    pub by_category: Vec<CategoryTotal>,
    /// Highest-spending category; `None` when there are no items.
    pub top: Option<CategoryTotal>,
}

impl Summary {
    pub fn from_expenses(items: &[Expense]) -> Self {
        let total = items.iter().map(Amounted::amount).sum();
        let by_category = group_by_category(items);
        let top = top_category(&by_category);
        Self {
            total,
            count: items.len(),
            by_category,
            top,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn category_total(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    /// Percentage of the overall total spent in `category`; 0 when nothing was spent.
    pub fn share_of(&self, category: &str) -> f64 {
        match self.category_total(category) {
            Some(value) if self.total > 0.0 => value / self.total * 100.0,
            _ => 0.0,
        }
    }
}

/// Free-function form of [`Summary::from_expenses`].
pub fn aggregate(items: &[Expense]) -> Summary {
    Summary::from_expenses(items)
}

pub fn group_by_category(items: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in items {
        match totals
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => entry.total += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }
    totals
}

fn top_category(totals: &[CategoryTotal]) -> Option<CategoryTotal> {
    let mut ranked: Vec<&CategoryTotal> = totals.iter().collect();
    ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
    ranked.first().map(|entry| (*entry).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(amount: f64, category: &str) -> Expense {
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        Expense::new(amount, category, date, "")
    }

    #[test]
    fn aggregates_totals_and_top_category() {
        let items = vec![
            expense(100.0, "Food"),
            expense(50.0, "Food"),
            expense(30.0, "Travel"),
        ];
        let summary = aggregate(&items);
        assert_eq!(summary.total, 180.0);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.category_total("Food"), Some(150.0));
        assert_eq!(summary.category_total("Travel"), Some(30.0));
        assert_eq!(summary.by_category.len(), 2);
        let top = summary.top.expect("top category");
        assert_eq!(top.category, "Food");
        assert_eq!(top.total, 150.0);
    }

    #[test]
    fn empty_input_has_no_top() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.count, 0);
        assert!(summary.by_category.is_empty());
        assert!(summary.top.is_none());
        assert_eq!(summary.share_of("Food"), 0.0);
    }

    #[test]
    fn tied_top_is_one_of_the_leaders() {
        let items = vec![expense(20.0, "Bills"), expense(20.0, "Health")];
        let top = aggregate(&items).top.expect("top category");
        assert!(["Bills", "Health"].contains(&top.category.as_str()));
        assert_eq!(top.total, 20.0);
    }

    #[test]
    fn share_is_percentage_of_total() {
        let items = vec![expense(75.0, "Food"), expense(25.0, "Travel")];
        let summary = aggregate(&items);
        assert_eq!(summary.share_of("Food"), 75.0);
        assert_eq!(summary.share_of("Missing"), 0.0);
    }
}
