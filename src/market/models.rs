// src/market/models.rs
use chrono::{DateTime, NaiveDate, Utc};

/// Snapshot valuation fields. Any of them may be missing from the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteSnapshot {
    pub last_price: Option<f64>,
    pub shares_outstanding: Option<f64>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Officer {
    pub name: String,
    pub title: String,
}

/// Descriptive company fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyProfile {
    pub short_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub business_summary: Option<String>,
    pub officers: Vec<Officer>,
    pub full_time_employees: Option<u64>,
}

impl CompanyProfile {
    /// Non-empty address parts joined by ", ".
    pub fn address(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub last_price: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    pub implied_volatility: Option<f64>,
    pub in_the_money: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionChain {
    /// Every expiration the provider lists for the symbol.
    pub expirations: Vec<NaiveDate>,
    /// The expiration `calls` and `puts` belong to.
    pub expiration: Option<NaiveDate>,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// Analyst recommendation counts for one period ("0m", "-1m", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingPeriod {
    pub period: String,
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
}

impl RatingPeriod {
    pub fn total(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

/// One line of the major holders breakdown, e.g. ("insidersPercentHeld", 0.017).
#[derive(Debug, Clone, PartialEq)]
pub struct HolderShare {
    pub category: String,
    pub fraction: f64,
}

/// One fiscal quarter of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterRow {
    pub period_end: NaiveDate,
    /// Parallel to [`FinancialSnapshot::line_items`].
    pub values: Vec<Option<f64>>,
}

/// Quarterly statement reshaped so rows are quarters and columns line items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialSnapshot {
    pub line_items: Vec<String>,
    pub quarters: Vec<QuarterRow>,
}

impl FinancialSnapshot {
    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    /// Plain-text table for prompts: a header of line items, then one
    /// tab-separated row per quarter with raw values.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str("period");
        for item in &self.line_items {
            out.push('\t');
            out.push_str(item);
        }
        for row in &self.quarters {
            out.push('\n');
            out.push_str(&row.period_end.to_string());
            for value in &row.values {
                out.push('\t');
                match value {
                    Some(v) => out.push_str(&v.to_string()),
                    None => out.push_str("NaN"),
                }
            }
        }
        out
    }
}
