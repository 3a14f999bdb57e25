use crate::core::summary::Summary;
use crate::currency::DisplayFormat;

/// Shown in place of the top category when nothing matches.
pub const NO_TOP_CATEGORY: &str = "—";

/// The three headline figures, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSummary {
    pub total: String,
    pub count: String,
    pub top: String,
}

impl StatSummary {
    pub fn from_summary(summary: &Summary, format: &DisplayFormat) -> Self {
        let top = summary
            .top
            .as_ref()
            .map(|top| format!("{} ({})", top.category, format.format_amount(top.total)))
            .unwrap_or_else(|| NO_TOP_CATEGORY.to_string());
        Self {
            total: format.format_amount(summary.total),
            count: summary.count.to_string(),
            top,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Total spent  : {}\nExpenses     : {}\nTop category : {}",
            self.total, self.count, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Expense;
    use chrono::NaiveDate;

    #[test]
    fn formats_headline_figures() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items = vec![
            Expense::new(100.0, "Food", date, ""),
            Expense::new(50.0, "Food", date, ""),
            Expense::new(30.0, "Travel", date, ""),
        ];
        let stats = StatSummary::from_summary(
            &Summary::from_expenses(&items),
            &DisplayFormat::default(),
        );
        assert_eq!(stats.total, "₹180.00");
        assert_eq!(stats.count, "3");
        assert_eq!(stats.top, "Food (₹150.00)");
    }

    #[test]
    fn empty_summary_uses_dash() {
        let stats = StatSummary::from_summary(&Summary::default(), &DisplayFormat::default());
        assert_eq!(stats.total, "₹0.00");
        assert_eq!(stats.count, "0");
        assert_eq!(stats.top, NO_TOP_CATEGORY);
        assert!(stats.render().ends_with("Top category : —"));
    }
}
