use crate::cli::ui::table_renderer::{Alignment, Table, TableColumn};
use crate::currency::{format_date, DisplayFormat};
use crate::domain::Expense;

pub const EMPTY_PLACEHOLDER: &str = "No expenses found.";

const SHORT_ID_LEN: usize = 8;

/// Builds the expense table for `items`, numbering rows from 1 for `delete #n`.
pub fn expense_table(items: &[Expense], format: &DisplayFormat) -> Table {
    let columns = vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Category", Alignment::Left).max_width(18),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Description", Alignment::Left).max_width(32),
        TableColumn::new("ID", Alignment::Left),
    ];
    let rows = items
        .iter()
        .enumerate()
        .map(|(idx, expense)| {
            vec![
                (idx + 1).to_string(),
                format_date(expense.date),
                expense.category.clone(),
                format.format_amount(expense.amount),
                expense.description.clone(),
                short_id(&expense.id),
            ]
        })
        .collect();
    Table::new(columns)
        .with_rows(rows)
        .with_placeholder(EMPTY_PLACEHOLDER)
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}
