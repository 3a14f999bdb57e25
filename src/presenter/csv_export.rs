//! CSV export of the filtered view.

use std::{fs, path::Path};

use tracing::info;

use crate::core::errors::{Result, TrackerError};
use crate::domain::Expense;

pub const CSV_HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Serializes expenses with RFC 4180 quoting and `\n` line endings.
pub fn to_csv(items: &[Expense]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for expense in items {
        writer.write_record([
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category.clone(),
            format!("{:.2}", expense.amount),
            expense.description.clone(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| TrackerError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| TrackerError::Export(err.to_string()))
}

/// Writes the CSV to `path`, returning the number of data rows.
pub fn write_csv(items: &[Expense], path: &Path) -> Result<usize> {
    let body = to_csv(items)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    info!(rows = items.len(), path = %path.display(), "exported expenses");
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(description: &str) -> Expense {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        Expense::new(12.5, "Food", date, description)
    }

    #[test]
    fn header_only_for_empty_view() {
        assert_eq!(to_csv(&[]).unwrap(), "Date,Category,Amount,Description\n");
    }

    #[test]
    fn quotes_commas_and_doubles_quotes() {
        let csv = to_csv(&[expense(r#"He said, "hi""#)]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, r#"2024-03-02,Food,12.50,"He said, ""hi""""#);
    }

    #[test]
    fn quotes_embedded_newlines() {
        let csv = to_csv(&[expense("line one\nline two")]).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn plain_fields_stay_unquoted() {
        let csv = to_csv(&[expense("groceries")]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("2024-03-02,Food,12.50,groceries"));
    }
}
