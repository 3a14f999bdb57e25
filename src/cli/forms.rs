//! Interactive add-expense wizard.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::core::CommandError;
use crate::core::validation::{Field, Validator};
use crate::domain::{expense::parse_amount, ExpenseDraft};

const CUSTOM_CATEGORY: &str = "Custom…";

/// Raw answers collected by the wizard, before coercion into a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseFormData {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl ExpenseFormData {
    pub fn into_draft(self) -> ExpenseDraft {
        ExpenseDraft::from_input(&self.amount, &self.category, &self.date, &self.description)
    }
}

pub struct ExpenseWizard<'a> {
    theme: &'a ColorfulTheme,
    categories: &'a [String],
    today: NaiveDate,
}

impl<'a> ExpenseWizard<'a> {
    pub fn new(theme: &'a ColorfulTheme, categories: &'a [String], today: NaiveDate) -> Self {
        Self {
            theme,
            categories,
            today,
        }
    }

    /// Walks through every field. `Ok(None)` means the user backed out of the category picker.
    pub fn run(&self) -> Result<Option<ExpenseFormData>, CommandError> {
        let amount = Input::<String>::with_theme(self.theme)
            .with_prompt("Amount")
            .validate_with(|value: &String| -> Result<(), &'static str> {
                if Validator::check_amount(parse_amount(value)) {
                    Ok(())
                } else {
                    Err(Field::Amount.hint())
                }
            })
            .interact_text()?;

        let Some(category) = self.pick_category()? else {
            return Ok(None);
        };

        let today = self.today;
        let date = Input::<String>::with_theme(self.theme)
            .with_prompt("Date (YYYY-MM-DD)")
            .default(today.format("%Y-%m-%d").to_string())
            .validate_with(move |value: &String| -> Result<(), &'static str> {
                let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
                if Validator::check_date(parsed, today) {
                    Ok(())
                } else {
                    Err(Field::Date.hint())
                }
            })
            .interact_text()?;

        let description = Input::<String>::with_theme(self.theme)
            .with_prompt("Description")
            .allow_empty(true)
            .interact_text()?;

        Ok(Some(ExpenseFormData {
            amount,
            category,
            date,
            description,
        }))
    }

    fn pick_category(&self) -> Result<Option<String>, CommandError> {
        let mut items: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        items.push(CUSTOM_CATEGORY);
        let choice = Select::with_theme(self.theme)
            .with_prompt("Category")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match choice {
            None => Ok(None),
            Some(idx) if idx < self.categories.len() => Ok(Some(self.categories[idx].clone())),
            Some(_) => {
                let typed = Input::<String>::with_theme(self.theme)
                    .with_prompt("Category name")
                    .validate_with(|value: &String| -> Result<(), &'static str> {
                        if Validator::check_category(value.trim()) {
                            Ok(())
                        } else {
                            Err(Field::Category.hint())
                        }
                    })
                    .interact_text()?;
                Ok(Some(typed.trim().to_string()))
            }
        }
    }
}
