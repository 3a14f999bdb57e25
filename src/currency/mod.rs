//! Currency and date formatting for display.

use chrono::{Datelike, NaiveDate};

use crate::config::Config;

/// Display settings derived from the user configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub currency: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub screen_reader_mode: bool,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            currency: "INR".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            screen_reader_mode: false,
        }
    }
}

impl DisplayFormat {
    pub fn for_currency(code: impl Into<String>) -> Self {
        Self {
            currency: code.into().to_uppercase(),
            ..Self::default()
        }
    }

    /// Currency from the config, separators from its locale tag.
    pub fn from_config(config: &Config) -> Self {
        let (decimal_separator, grouping_separator) = separators_for(&config.locale);
        Self {
            currency: config.currency.to_uppercase(),
            decimal_separator,
            grouping_separator,
            screen_reader_mode: config.screen_reader_mode,
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_currency_value(amount, self)
    }
}

/// Decimal and grouping separators for a BCP 47 language tag.
pub fn separators_for(locale: &str) -> (char, char) {
    match locale {
        "fr-FR" => (',', ' '),
        "de-DE" | "es-ES" | "it-IT" => (',', '.'),
        _ => ('.', ','),
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(format: &DisplayFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), Some(frac.to_string())),
        None => (body.clone(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, format.grouping_separator)),
        None => group_digits(&int_part, format.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, format.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(amount: f64, format: &DisplayFormat) -> String {
    let code = format.currency.as_str();
    let body = format_number(format, amount.abs(), minor_units_for(code));
    let sign = if amount < 0.0 { "-" } else { "" };
    if format.screen_reader_mode {
        let prefix = if amount < 0.0 { "minus " } else { "" };
        return format!("{prefix}{body} {code}");
    }
    format!("{}{}{}", sign, symbol_for(code), body)
}

/// Medium date style, e.g. `05 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
