//! Rendering of the filtered expense view: table, headline stats, category chart, CSV.

pub mod chart;
pub mod csv_export;
pub mod stats;
pub mod table;

use std::path::Path;

use tracing::debug;

use crate::cli::ui::table_renderer::Table;
use crate::core::{errors::Result, summary::Summary};
use crate::currency::DisplayFormat;
use crate::domain::Expense;

pub use chart::{CategoryChart, ChartSlice, CHART_TITLE, PALETTE};
pub use csv_export::{to_csv, write_csv, CSV_HEADER};
pub use stats::StatSummary;
pub use table::{expense_table, EMPTY_PLACEHOLDER};

/// Cells used for the stacked chart bar.
pub const CHART_WIDTH: usize = 48;

/// Everything currently on screen, rebuilt from scratch whenever the view changes.
pub struct Dashboard {
    format: DisplayFormat,
    view: Vec<Expense>,
    summary: Summary,
    chart: Option<CategoryChart>,
    generation: u64,
}

impl Dashboard {
    pub fn new(format: DisplayFormat) -> Self {
        Self {
            format,
            view: Vec::new(),
            summary: Summary::default(),
            chart: None,
            generation: 0,
        }
    }

    /// Replaces the view. The previous chart is dropped and a new one generated.
    pub fn refresh(&mut self, view: Vec<Expense>) {
        self.summary = Summary::from_expenses(&view);
        self.view = view;
        self.generation += 1;
        self.chart = Some(CategoryChart::from_summary(&self.summary, self.generation));
        debug!(
            generation = self.generation,
            items = self.view.len(),
            "dashboard refreshed"
        );
    }

    pub fn set_format(&mut self, format: DisplayFormat) {
        self.format = format;
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn view(&self) -> &[Expense] {
        &self.view
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn chart(&self) -> Option<&CategoryChart> {
        self.chart.as_ref()
    }

    pub fn chart_generation(&self) -> u64 {
        self.generation
    }

    pub fn table(&self) -> Table {
        expense_table(&self.view, &self.format)
    }

    pub fn stats(&self) -> StatSummary {
        StatSummary::from_summary(&self.summary, &self.format)
    }

    pub fn render_chart(&self, plain: bool) -> String {
        match &self.chart {
            Some(chart) => chart.render(CHART_WIDTH, &self.format, plain),
            None => CategoryChart::from_summary(&self.summary, self.generation).render(
                CHART_WIDTH,
                &self.format,
                plain,
            ),
        }
    }

    /// Table, stats and chart, separated by blank lines.
    pub fn render(&self, plain: bool) -> String {
        [
            self.table().render(),
            self.stats().render(),
            self.render_chart(plain),
        ]
        .join("\n\n")
    }

    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        write_csv(&self.view, path)
    }
}
