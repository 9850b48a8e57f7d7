// src/market/performance.rs
use crate::market::models::PriceBar;
use crate::market::MarketDataProvider;
use crate::symbol::Symbol;
use crate::utils::error::MarketError;
use chrono::{Datelike, Duration, NaiveDate};

/// Percentage price change over the trailing windows shown on the company view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Performance {
    pub three_month: Option<f64>,
    pub six_month: Option<f64>,
    pub ytd: Option<f64>,
    pub one_year: Option<f64>,
}

/// Earliest date a history request must cover for [`price_performance`].
pub fn history_start(today: NaiveDate) -> NaiveDate {
    let one_year_ago = today - Duration::days(365);
    one_year_ago.min(start_of_year(today))
}

/// Computes window returns from daily bars (any order).
///
/// The current price is the latest close. Each window's base is the first
/// close on or after the window start; a window without bars is `None`.
pub fn price_performance(bars: &[PriceBar], today: NaiveDate) -> Performance {
    let mut sorted: Vec<&PriceBar> = bars.iter().filter(|b| b.date <= today).collect();
    sorted.sort_by_key(|b| b.date);

    let Some(current) = sorted.last().map(|b| b.close) else {
        return Performance::default();
    };

    let change_since = |start: NaiveDate| -> Option<f64> {
        let base = sorted.iter().find(|b| b.date >= start)?.close;
        if base == 0.0 {
            return None;
        }
        Some((current - base) / base * 100.0)
    };

    Performance {
        three_month: change_since(today - Duration::days(90)),
        six_month: change_since(today - Duration::days(180)),
        ytd: change_since(start_of_year(today)),
        one_year: change_since(today - Duration::days(365)),
    }
}

/// One history fetch covering every window, reduced to [`Performance`].
pub async fn fetch_performance(
    provider: &dyn MarketDataProvider,
    symbol: &Symbol,
    today: NaiveDate,
) -> Result<Performance, MarketError> {
    let bars = provider.history(symbol, history_start(today), today).await?;
    Ok(price_performance(&bars, today))
}

fn start_of_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
}
