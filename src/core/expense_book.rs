//! The owned in-memory expense collection and its persistence wiring.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::core::{
    errors::{Result, TrackerError},
    filter::ExpenseFilter,
    summary::Summary,
    time::{Clock, SystemClock},
    validation::{ValidationReport, Validator},
};
use crate::domain::{generate_id, Expense, ExpenseDraft, Identifiable};
use crate::storage::ExpenseStore;

/// Canonical list of expenses, loaded once and flushed to the store after every change.
pub struct ExpenseBook {
    expenses: Vec<Expense>,
    store: Box<dyn ExpenseStore>,
    clock: Box<dyn Clock>,
}

impl ExpenseBook {
    /// Loads whatever the store holds; unreadable data yields an empty book.
    pub fn open(store: Box<dyn ExpenseStore>) -> Self {
        Self::open_with_clock(store, Box::new(SystemClock))
    }

    pub fn open_with_clock(store: Box<dyn ExpenseStore>, clock: Box<dyn Clock>) -> Self {
        let expenses = store.load(clock.today());
        info!(count = expenses.len(), location = %store.location(), "expense book opened");
        Self {
            expenses,
            store,
            clock,
        }
    }

    /// Expenses in storage (insertion) order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id() == id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &dyn ExpenseStore {
        self.store.as_ref()
    }

    pub fn validate(&self, draft: &ExpenseDraft) -> ValidationReport {
        Validator::validate(draft, self.today())
    }

    /// Validates and appends a new expense, then persists the collection.
    pub fn add(&mut self, draft: &ExpenseDraft) -> Result<&Expense> {
        let report = self.validate(draft);
        if !report.is_valid() {
            debug!(%report, "rejected expense draft");
            return Err(TrackerError::Validation(report));
        }
        let mut expense =
            Expense::from_draft(draft).ok_or(TrackerError::Validation(report))?;
        while self.get(&expense.id).is_some() {
            expense.id = generate_id();
        }
        info!(id = %expense.id, category = %expense.category, amount = expense.amount, "expense added");
        self.expenses.push(expense);
        self.persist()?;
        let index = self.expenses.len() - 1;
        Ok(&self.expenses[index])
    }

    /// Removes the expense with `id`. Unknown ids leave the book untouched.
    pub fn delete(&mut self, id: &str) -> Result<Option<Expense>> {
        let Some(index) = self.expenses.iter().position(|expense| expense.id() == id) else {
            debug!(id, "delete ignored; no such expense");
            return Ok(None);
        };
        let removed = self.expenses.remove(index);
        info!(id = %removed.id, "expense deleted");
        self.persist()?;
        Ok(Some(removed))
    }

    /// Filtered view, most recent first.
    pub fn view(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        filter.apply(&self.expenses)
    }

    pub fn summary(&self, filter: &ExpenseFilter) -> Summary {
        Summary::from_expenses(&self.view(filter))
    }

    /// Distinct categories present, in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for expense in &self.expenses {
            if !seen.contains(&expense.category) {
                seen.push(expense.category.clone());
            }
        }
        seen
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.expenses)
    }
}
