// src/market/mod.rs
pub mod models;
pub mod performance;
pub mod yahoo;

use crate::symbol::Symbol;
use crate::utils::error::MarketError;
use async_trait::async_trait;
use chrono::NaiveDate;

pub use models::{
    CompanyProfile, FinancialSnapshot, HolderShare, NewsArticle, OptionChain, PriceBar,
    QuoteSnapshot, RatingPeriod,
};
pub use yahoo::YahooFinance;

/// Read operations against a market data provider.
///
/// Every call goes straight to the provider: no caching, no composition,
/// no validation beyond what deserialization enforces.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn quote(&self, symbol: &Symbol) -> Result<QuoteSnapshot, MarketError>;

    async fn profile(&self, symbol: &Symbol) -> Result<CompanyProfile, MarketError>;

    /// Daily bars from `start` through `end`, both inclusive.
    async fn history(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, MarketError>;

    /// Chain for `expiration`, or the nearest expiration when `None`.
    async fn option_chain(
        &self,
        symbol: &Symbol,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionChain, MarketError>;

    async fn recommendations(&self, symbol: &Symbol) -> Result<Vec<RatingPeriod>, MarketError>;

    async fn quarterly_financials(&self, symbol: &Symbol) -> Result<FinancialSnapshot, MarketError>;

    async fn quarterly_balance_sheet(&self, symbol: &Symbol) -> Result<FinancialSnapshot, MarketError>;

    async fn news(&self, symbol: &Symbol) -> Result<Vec<NewsArticle>, MarketError>;

    async fn major_holders(&self, symbol: &Symbol) -> Result<Vec<HolderShare>, MarketError>;
}
