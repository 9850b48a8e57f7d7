// src/market/yahoo.rs
use crate::config::AppConfig;
use crate::market::models::*;
use crate::market::MarketDataProvider;
use crate::symbol::Symbol;
use crate::utils::error::MarketError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use yfinance_rs::{Interval, Range, Ticker, YfClient};

// Yahoo rejects requests without a browser-like agent.
const YAHOO_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

const INCOME_LINE_ITEMS: [&str; 4] = ["Total Revenue", "Gross Profit", "Operating Income", "Net Income"];

const BALANCE_LINE_ITEMS: [&str; 5] =
    ["Total Assets", "Total Liabilities", "Total Equity", "Cash", "Long Term Debt"];

/// Yahoo Finance through `yfinance_rs`, which owns the cookie and crumb
/// handshake. Every call is a fresh request.
pub struct YahooFinance {
    client: YfClient,
}

impl YahooFinance {
    pub fn new(config: &AppConfig) -> Result<Self, MarketError> {
        let client = YfClient::builder()
            .custom_client(config.yahoo_http_client()?)
            .user_agent(YAHOO_USER_AGENT)
            .build()
            .map_err(|e| MarketError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    fn ticker(&self, symbol: &Symbol) -> Ticker {
        Ticker::new(&self.client, symbol.as_str())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinance {
    async fn quote(&self, symbol: &Symbol) -> Result<QuoteSnapshot, MarketError> {
        let ticker = self.ticker(symbol);
        let (quote, balance_sheet) = tokio::join!(ticker.quote(), ticker.quarterly_balance_sheet());
        let quote = quote?;
        let last_price = quote
            .regular_market_price
            .or(quote.regular_market_previous_close)
            .ok_or_else(|| MarketError::MissingField(format!("{}: regularMarketPrice", symbol)))?;

        // Shares come from the latest balance sheet; a failure there only
        // blanks the share-derived fields.
        let shares_outstanding = match balance_sheet {
            Ok(rows) => rows
                .iter()
                .max_by_key(|row| row.period_end)
                .and_then(|row| row.shares_outstanding)
                .map(|shares| shares as f64),
            Err(e) => {
                tracing::warn!("Shares outstanding unavailable for {}: {}", symbol, e);
                None
            }
        };

        Ok(QuoteSnapshot {
            last_price: Some(last_price),
            shares_outstanding,
            market_cap: market_cap(Some(last_price), shares_outstanding),
            enterprise_value: None,
        })
    }

    async fn profile(&self, symbol: &Symbol) -> Result<CompanyProfile, MarketError> {
        let info = self.ticker(symbol).info().await?;
        let address = info.address.as_ref();
        Ok(CompanyProfile {
            short_name: info.short_name.clone(),
            city: address.and_then(|a| a.city.clone()),
            state: address.and_then(|a| a.state.clone()),
            country: address.and_then(|a| a.country.clone()),
            website: info.website.clone(),
            business_summary: info.summary.clone(),
            officers: Vec::new(),
            full_time_employees: None,
        })
    }

    async fn history(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketError> {
        let today = Utc::now().date_naive();
        let candles = self
            .ticker(symbol)
            .history(Some(history_range(start, today)), Some(Interval::D1), false)
            .await?;

        let bars: Vec<PriceBar> = candles
            .iter()
            .filter_map(|c| {
                Some(PriceBar {
                    date: unix_date(c.ts)?,
                    open: c.open,
                    high: c.high,
                    low: c.low,
                    close: c.close,
                    volume: c.volume.map(|v| v as u64),
                })
            })
            .filter(|bar| bar.date >= start && bar.date <= end)
            .collect();
        tracing::debug!("{} daily bars for {} between {} and {}", bars.len(), symbol, start, end);
        Ok(bars)
    }

    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, MarketError> {
        let ticker = self.ticker(symbol);
        let listed = ticker.options().await?;
        let Some(selected) = select_expiration(&listed, expiration, symbol)? else {
            return Ok(OptionChain::default());
        };

        let chain = ticker.option_chain(Some(selected)).await?;
        let convert = |c: &yfinance_rs::OptionContract| OptionContract {
            contract_symbol: c.contract_symbol.clone(),
            strike: c.strike,
            last_price: c.last_price,
            bid: c.bid,
            ask: c.ask,
            volume: c.volume.map(|v| v as u64),
            open_interest: c.open_interest.map(|v| v as u64),
            implied_volatility: c.implied_volatility,
            in_the_money: c.in_the_money,
        };

        Ok(OptionChain {
            expirations: listed.iter().filter_map(|ts| unix_date(*ts)).collect(),
            expiration: unix_date(selected),
            calls: chain.calls.iter().map(convert).collect(),
            puts: chain.puts.iter().map(convert).collect(),
        })
    }

    async fn recommendations(&self, symbol: &Symbol) -> Result<Vec<RatingPeriod>, MarketError> {
        let rows = self.ticker(symbol).recommendations().await?;
        Ok(rows
            .iter()
            .map(|r| RatingPeriod {
                period: r.period.to_string(),
                strong_buy: r.strong_buy as u32,
                buy: r.buy as u32,
                hold: r.hold as u32,
                sell: r.sell as u32,
                strong_sell: r.strong_sell as u32,
            })
            .collect())
    }

    async fn quarterly_financials(&self, symbol: &Symbol) -> Result<FinancialSnapshot, MarketError> {
        let rows = self.ticker(symbol).quarterly_income_stmt().await?;
        Ok(statement_snapshot(
            &INCOME_LINE_ITEMS,
            rows.iter()
                .map(|r| {
                    (
                        r.period_end,
                        vec![r.total_revenue, r.gross_profit, r.operating_income, r.net_income],
                    )
                })
                .collect(),
        ))
    }

    async fn quarterly_balance_sheet(&self, symbol: &Symbol) -> Result<FinancialSnapshot, MarketError> {
        let rows = self.ticker(symbol).quarterly_balance_sheet().await?;
        Ok(statement_snapshot(
            &BALANCE_LINE_ITEMS,
            rows.iter()
                .map(|r| {
                    (
                        r.period_end,
                        vec![r.total_assets, r.total_liabilities, r.total_equity, r.cash, r.long_term_debt],
                    )
                })
                .collect(),
        ))
    }

    async fn news(&self, symbol: &Symbol) -> Result<Vec<NewsArticle>, MarketError> {
        let articles = self.ticker(symbol).news().await?;
        Ok(articles
            .iter()
            .map(|a| NewsArticle {
                title: non_empty(a.title.clone()),
                publisher: a.publisher.clone(),
                published: DateTime::<Utc>::from_timestamp(a.provider_publish_time, 0),
                url: a.link.clone(),
            })
            .collect())
    }

    async fn major_holders(&self, symbol: &Symbol) -> Result<Vec<HolderShare>, MarketError> {
        let holders = self.ticker(symbol).major_holders().await?;
        Ok(holders
            .iter()
            .filter_map(|h| {
                Some(HolderShare {
                    category: h.category.clone(),
                    fraction: holder_fraction(&h.value.to_string())?,
                })
            })
            .collect())
    }
}

// conversions
// ----------------------------------------------------------------------------

/// Smallest provider range reaching back to `start`.
fn history_range(start: NaiveDate, today: NaiveDate) -> Range {
    if start >= today - Duration::days(365) {
        Range::Y1
    } else {
        Range::Max
    }
}

fn unix_date(ts: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Listed expiration matching `wanted`, or the nearest one when `None`.
fn select_expiration(
    listed: &[i64],
    wanted: Option<NaiveDate>,
    symbol: &Symbol,
) -> Result<Option<i64>, MarketError> {
    match wanted {
        None => Ok(listed.iter().min().copied()),
        Some(date) => listed
            .iter()
            .copied()
            .find(|ts| unix_date(*ts) == Some(date) || *ts == unix_midnight(date))
            .map(Some)
            .ok_or_else(|| MarketError::NoData(format!("{}: no options expiring {}", symbol, date))),
    }
}

fn market_cap(price: Option<f64>, shares: Option<f64>) -> Option<f64> {
    Some(price? * shares?)
}

/// Holder values come either as a fraction (`0.6123`) or a percent string
/// (`"61.23%"`); both become a fraction.
fn holder_fraction(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    match trimmed.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
        None => trimmed.parse::<f64>().ok(),
    }
}

/// Quarters newest first, values parallel to `line_items`.
fn statement_snapshot(line_items: &[&str], rows: Vec<(i64, Vec<Option<f64>>)>) -> FinancialSnapshot {
    let mut quarters: Vec<QuarterRow> = rows
        .into_iter()
        .filter_map(|(period_end, values)| {
            Some(QuarterRow {
                period_end: unix_date(period_end)?,
                values,
            })
        })
        .collect();
    quarters.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    FinancialSnapshot {
        line_items: line_items.iter().map(|s| s.to_string()).collect(),
        quarters,
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorKind;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn recent_starts_use_one_year_range() {
        let today = ymd(2024, 6, 30);
        assert!(matches!(history_range(ymd(2023, 7, 1), today), Range::Y1));
        assert!(matches!(history_range(ymd(2020, 1, 1), today), Range::Max));
    }

    #[test]
    fn nearest_expiration_is_the_earliest_listed() {
        let symbol = Symbol::parse("AAPL").unwrap();
        let listed = [1719532800, 1718928000, 1720137600];
        assert_eq!(select_expiration(&listed, None, &symbol).unwrap(), Some(1718928000));
        assert_eq!(select_expiration(&[], None, &symbol).unwrap(), None);
    }

    #[test]
    fn requested_expiration_must_be_listed() {
        let symbol = Symbol::parse("AAPL").unwrap();
        let listed = [1718928000];
        assert_eq!(
            select_expiration(&listed, Some(ymd(2024, 6, 21)), &symbol).unwrap(),
            Some(1718928000)
        );
        let err = select_expiration(&listed, Some(ymd(2024, 6, 28)), &symbol).unwrap_err();
        assert!(matches!(err, MarketError::NoData(_)));
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn market_cap_needs_price_and_shares() {
        assert_eq!(market_cap(Some(200.0), Some(12_500_000_000.0)), Some(2_500_000_000_000.0));
        assert_eq!(market_cap(Some(200.0), None), None);
    }

    #[test]
    fn holder_values_become_fractions() {
        assert_eq!(holder_fraction("0.6123"), Some(0.6123));
        assert_eq!(holder_fraction("1.50%"), Some(0.015));
        assert_eq!(holder_fraction("n/a"), None);
    }

    #[test]
    fn statements_are_ordered_newest_first() {
        let snapshot = statement_snapshot(
            &INCOME_LINE_ITEMS,
            vec![
                (unix_midnight(ymd(2023, 12, 30)), vec![Some(1.0), None, None, None]),
                (unix_midnight(ymd(2024, 3, 30)), vec![Some(2.0), None, None, None]),
            ],
        );
        assert_eq!(snapshot.line_items[0], "Total Revenue");
        assert_eq!(snapshot.quarters[0].period_end, ymd(2024, 3, 30));
        assert_eq!(snapshot.quarters[1].values[0], Some(1.0));
    }

    #[test]
    fn blank_titles_are_absent() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("Apple beats".to_string()), Some("Apple beats".to_string()));
    }
}
