// src/dashboard/format.rs
//! Display formatting for figures shown in the views and the HTML page.
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

pub const NOT_AVAILABLE: &str = "Not available";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;

static WEBSITE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://(www\.)?").expect("Failed to compile WEBSITE_PREFIX_RE"));

/// `1234.5` -> `$1,234.50`
pub fn format_price(price: f64) -> String {
    format!("${}", with_commas(price, 2))
}

/// Dollar amount scaled to billions or millions with one decimal,
/// grouped digits below a million: `$2500.0B`, `$500.0M`, `$900`.
pub fn format_money_compact(value: f64) -> String {
    if value >= BILLION {
        format!("${:.1}B", value / BILLION)
    } else if value >= MILLION {
        format!("${:.1}M", value / MILLION)
    } else {
        format!("${}", plain_number(value))
    }
}

pub fn format_optional_money(value: Option<f64>) -> String {
    value.map(format_money_compact).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Share counts: `15.4B`, `250.0M`, `950,000`.
pub fn format_shares(shares: f64) -> String {
    if shares >= BILLION {
        format!("{:.1}B", shares / BILLION)
    } else if shares >= MILLION {
        format!("{:.1}M", shares / MILLION)
    } else {
        plain_number(shares)
    }
}

pub fn format_employees(count: Option<u64>) -> String {
    match count {
        Some(n) => with_commas(n as f64, 0),
        None => "No employee information available.".to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Statement cell: `$1,234.00`, or `N/A` when the provider has no value.
pub fn format_currency_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", with_commas(v, 2)),
        None => "N/A".to_string(),
    }
}

/// Fiscal quarter label of a period-end date, e.g. `Q32023`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{}{}", (date.month() - 1) / 3 + 1, date.year())
}

/// Website without scheme and leading `www.` for display.
pub fn clean_website(url: &str) -> String {
    WEBSITE_PREFIX_RE.replace(url.trim(), "").into_owned()
}

fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        with_commas(value, 0)
    } else {
        with_commas(value, 2)
    }
}

/// Fixed-decimal rendering with `,` thousands separators. The sign is kept
/// in front of the digits: `-1234.5` -> `-1,234.50`.
pub fn with_commas(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cap_branches() {
        assert_eq!(format_money_compact(2_500_000_000_000.0), "$2500.0B");
        assert_eq!(format_money_compact(500_000_000.0), "$500.0M");
        assert_eq!(format_money_compact(900.0), "$900");
        assert_eq!(format_money_compact(1_000_000_000.0), "$1.0B");
        assert_eq!(format_money_compact(999_999.0), "$999,999");
    }

    #[test]
    fn absent_values_read_not_available() {
        assert_eq!(format_optional_money(None), "Not available");
        assert_eq!(format_percent(None), "Not available");
        assert_eq!(format_employees(None), "No employee information available.");
    }

    #[test]
    fn prices_and_cells_are_grouped() {
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(0.5), "$0.50");
        assert_eq!(format_currency_cell(Some(-2_345_678.0)), "$-2,345,678.00");
        assert_eq!(format_currency_cell(None), "N/A");
    }

    #[test]
    fn shares_and_employees() {
        assert_eq!(format_shares(15_441_900_000.0), "15.4B");
        assert_eq!(format_shares(250_000_000.0), "250.0M");
        assert_eq!(format_shares(950_000.0), "950,000");
        assert_eq!(format_employees(Some(161_000)), "161,000");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(Some(12.3456)), "12.35%");
        assert_eq!(format_percent(Some(-3.0)), "-3.00%");
    }

    #[test]
    fn quarter_labels() {
        assert_eq!(quarter_label(NaiveDate::from_ymd_opt(2023, 9, 30).unwrap()), "Q32023");
        assert_eq!(quarter_label(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), "Q12024");
        assert_eq!(quarter_label(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), "Q42023");
    }

    #[test]
    fn website_prefixes_are_stripped() {
        assert_eq!(clean_website("https://www.apple.com"), "apple.com");
        assert_eq!(clean_website("http://nvidia.com"), "nvidia.com");
        assert_eq!(clean_website("www.example.com"), "www.example.com");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(with_commas(-0.001, 2), "0.00");
    }
}
