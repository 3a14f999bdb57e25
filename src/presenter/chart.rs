//! Category pie chart, rendered as a stacked bar with a legend in the terminal.

use colored::Colorize;

use crate::core::summary::Summary;
use crate::currency::DisplayFormat;

pub const CHART_TITLE: &str = "Spending by Category";

/// Slices smaller than this share of the total get no percentage caption.
pub const LABEL_THRESHOLD_PERCENT: f64 = 6.0;

/// Pastel slice colours, cycled when there are more categories than entries.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0xA5, 0xB4, 0xFC),
    (0xC7, 0xD2, 0xFE),
    (0xFB, 0xCF, 0xE8),
    (0xBB, 0xF7, 0xD0),
    (0xFD, 0xE6, 0x8A),
    (0xFC, 0xA5, 0xA5),
    (0xBA, 0xE6, 0xFD),
    (0xFD, 0xBA, 0x74),
];

/// Fill characters standing in for colours in plain output.
const PLAIN_FILLS: [char; 8] = ['#', '=', '+', '*', '%', '@', '~', 'o'];

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    pub color: (u8, u8, u8),
    pub fill: char,
}

impl ChartSlice {
    /// `"<label> <pct>%"` for slices large enough to carry a caption.
    pub fn caption(&self) -> Option<String> {
        (self.percent >= LABEL_THRESHOLD_PERCENT)
            .then(|| format!("{} {:.0}%", self.label, self.percent))
    }
}

/// One generated chart instance. A new one replaces the old whenever the view changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    pub title: String,
    pub slices: Vec<ChartSlice>,
    pub generation: u64,
}

impl CategoryChart {
    pub fn from_summary(summary: &Summary, generation: u64) -> Self {
        let slices = summary
            .by_category
            .iter()
            .enumerate()
            .map(|(idx, entry)| ChartSlice {
                label: entry.category.clone(),
                value: entry.total,
                percent: summary.share_of(&entry.category),
                color: PALETTE[idx % PALETTE.len()],
                fill: PLAIN_FILLS[idx % PLAIN_FILLS.len()],
            })
            .collect();
        Self {
            title: CHART_TITLE.to_string(),
            slices,
            generation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(|slice| slice.value <= 0.0)
    }

    /// Splits `width` cells across slices by largest remainder so the bar is always full.
    pub fn segment_widths(&self, width: usize) -> Vec<usize> {
        let total: f64 = self.slices.iter().map(|slice| slice.value.max(0.0)).sum();
        if total <= 0.0 || width == 0 {
            return vec![0; self.slices.len()];
        }
        let exact: Vec<f64> = self
            .slices
            .iter()
            .map(|slice| slice.value.max(0.0) / total * width as f64)
            .collect();
        let mut widths: Vec<usize> = exact.iter().map(|value| value.floor() as usize).collect();
        let mut remaining = width.saturating_sub(widths.iter().sum());
        let mut order: Vec<usize> = (0..exact.len()).collect();
        order.sort_by(|&a, &b| {
            let frac_a = exact[a] - exact[a].floor();
            let frac_b = exact[b] - exact[b].floor();
            frac_b.total_cmp(&frac_a)
        });
        for idx in order {
            if remaining == 0 {
                break;
            }
            widths[idx] += 1;
            remaining -= 1;
        }
        widths
    }

    pub fn render(&self, width: usize, format: &DisplayFormat, plain: bool) -> String {
        let mut lines = vec![self.title.clone()];
        if self.is_empty() {
            lines.push("(no spending to chart)".to_string());
            return lines.join("\n");
        }

        let mut bar = String::new();
        for (slice, cells) in self.slices.iter().zip(self.segment_widths(width)) {
            if cells == 0 {
                continue;
            }
            if plain {
                bar.push_str(&slice.fill.to_string().repeat(cells));
            } else {
                let (r, g, b) = slice.color;
                bar.push_str(&"█".repeat(cells).truecolor(r, g, b).to_string());
            }
        }
        lines.push(bar);

        for slice in &self.slices {
            let swatch = if plain {
                slice.fill.to_string()
            } else {
                let (r, g, b) = slice.color;
                "■".truecolor(r, g, b).to_string()
            };
            let amount = format.format_amount(slice.value);
            let line = match slice.caption() {
                Some(caption) => format!("{swatch} {caption} ({amount})"),
                None => format!("{swatch} {} ({amount})", slice.label),
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}
