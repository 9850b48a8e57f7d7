// src/dashboard/views.rs
//! Terminal renderings, one per dashboard tab. Each view takes already
//! fetched results and never fails: errors become placeholders chosen by
//! their [`ErrorKind`].
use crate::ai::NarrativeResult;
use crate::dashboard::format::*;
use crate::edgar::FilingRecord;
use crate::market::models::OptionContract;
use crate::market::performance::Performance;
use crate::market::{
    CompanyProfile, FinancialSnapshot, HolderShare, NewsArticle, OptionChain, PriceBar,
    QuoteSnapshot, RatingPeriod,
};
use crate::utils::error::{EdgarError, MarketError};
use crate::utils::ErrorKind;
use colored::Colorize;

const BAR_WIDTH: u32 = 30;
const NO_DATA: &str = "No data available.";

/// Placeholder shown in place of data that failed to load.
pub fn placeholder(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::MissingField => NOT_AVAILABLE,
        ErrorKind::FetchFailure | ErrorKind::ParseFailure => NO_DATA,
        ErrorKind::BackendUnavailable => crate::ai::AI_FALLBACK_MESSAGE,
    }
}

pub fn header(title: &str) -> String {
    format!("\n{}\n", format!("== {} ==", title).bold().cyan())
}

pub fn company_view(
    symbol: &str,
    profile: &Result<CompanyProfile, MarketError>,
    quote: &Result<QuoteSnapshot, MarketError>,
    performance: &Result<Performance, MarketError>,
) -> String {
    let mut out = String::new();

    match profile {
        Ok(profile) => {
            let name = profile.short_name.as_deref().unwrap_or(symbol);
            out.push_str(&header(name));
            let address = profile.address();
            if !address.is_empty() {
                out.push_str(&format!("{}\n", address));
            }
            match &profile.website {
                Some(site) => {
                    out.push_str(&format!("🔗 {} ({})\n", clean_website(site), site));
                }
                None => out.push_str("Website: Not available\n"),
            }
        }
        Err(e) => {
            out.push_str(&header(symbol));
            out.push_str(&format!("Company profile: {}\n", placeholder(e.kind())));
        }
    }

    match quote {
        Ok(q) => {
            out.push_str(&format!("Price: {}\n", q.last_price.map(format_price).unwrap_or_else(|| NOT_AVAILABLE.into())));
            let shares = q.shares_outstanding.map(format_shares).unwrap_or_else(|| NOT_AVAILABLE.into());
            out.push_str(&format!("Shares Out: {}\n", shares));
            out.push_str(&format!("Market Cap: {}\n", format_optional_money(q.market_cap)));
            out.push_str(&format!("Enterprise Value: {}\n", format_optional_money(q.enterprise_value)));
        }
        Err(e) => {
            out.push_str(&format!("Quote: {}\n", placeholder(e.kind())));
        }
    }

    out.push_str(&header("Performance"));
    match performance {
        Ok(p) => {
            out.push_str(&format!("3mo: {}\n", format_percent(p.three_month)));
            out.push_str(&format!("6mo: {}\n", format_percent(p.six_month)));
            out.push_str(&format!("YTD: {}\n", format_percent(p.ytd)));
            out.push_str(&format!("1yr: {}\n", format_percent(p.one_year)));
        }
        Err(e) => {
            out.push_str(&format!("{}\n", placeholder(e.kind())));
        }
    }

    if let Ok(profile) = profile {
        out.push_str(&header("About"));
        match &profile.business_summary {
            Some(summary) => {
                out.push_str(&format!("{}\n", summary));
            }
            None => out.push_str("Business summary not available.\n"),
        }

        out.push_str(&header("Officers"));
        if profile.officers.is_empty() {
            out.push_str("No officers information available.\n");
        }
        for officer in &profile.officers {
            out.push_str(&format!("- {}: {}\n", officer.name.bold(), officer.title));
        }

        out.push_str(&header("Employees"));
        out.push_str(&format!("{}\n", format_employees(profile.full_time_employees)));
    }

    out
}

/// Quarters as rows; each line item of a quarter on its own line.
pub fn statement_view(title: &str, unavailable: &str, snapshot: &Result<FinancialSnapshot, MarketError>) -> String {
    let mut out = header(title);
    match snapshot {
        Ok(s) if !s.is_empty() => {
            let width = s.line_items.iter().map(|i| i.len()).max().unwrap_or(0);
            for row in &s.quarters {
                out.push_str(&format!("{}\n", quarter_label(row.period_end).bold()));
                for (item, value) in s.line_items.iter().zip(&row.values) {
                    out.push_str(&format!("  {:<width$}  {:>22}\n", item, format_currency_cell(*value), width = width));
                }
            }
        }
        Ok(_) => {
            out.push_str(&format!("{}\n", unavailable));
        }
        Err(e) => {
            tracing::warn!("{} unavailable: {}", title, e);
            out.push_str(&format!("{}\n", unavailable));
        }
    }
    out
}

pub fn financials_view(
    balance_sheet: &Result<FinancialSnapshot, MarketError>,
    financials: &Result<FinancialSnapshot, MarketError>,
) -> String {
    let mut out = statement_view(
        "Quarterly Balance Sheet",
        "Quarterly Balance Sheet (QBS) data is not available.",
        balance_sheet,
    );
    out.push_str(&statement_view(
        "Quarterly Financial Statements",
        "Quarterly Financial Statements (QFS) data is not available.",
        financials,
    ));
    out
}

pub fn filings_view(filings: &Result<Vec<FilingRecord>, EdgarError>) -> String {
    let mut out = header("Most Recent SEC Filings:");
    match filings {
        Ok(list) if list.is_empty() => out.push_str("No filings listed.\n"),
        Ok(list) => {
            out.push_str(&format!("{:<10} {:<12} {}\n", "Type".bold(), "Date".bold(), "Description".bold()));
            for filing in list {
                out.push_str(&format!("{:<10} {:<12} {}\n", filing.filing_type, filing.date, first_line(&filing.description)));
                out.push_str(&format!("{:<23} {}\n", "", filing.document_url.dimmed()));
            }
        }
        Err(e) => {
            tracing::warn!("SEC filings unavailable: {}", e);
            out.push_str(&format!("{}\n", placeholder(e.kind())));
        }
    }
    out
}

pub fn options_view(symbol: &str, chain: &Result<OptionChain, MarketError>) -> String {
    let mut out = header(&format!("Options for {}", symbol));
    let chain = match chain {
        Ok(c) if !c.is_empty() => c,
        Ok(_) => {
            out.push_str("No options data available for this symbol.\n");
            return out;
        }
        Err(e) => {
            tracing::warn!("Option chain unavailable: {}", e);
            out.push_str("No options data available for this symbol.\n");
            return out;
        }
    };

    let expirations: Vec<String> = chain.expirations.iter().map(|d| d.to_string()).collect();
    out.push_str(&format!("Expirations: {}\n", expirations.join(", ")));
    if let Some(exp) = chain.expiration {
        out.push_str(&format!("Showing: {}\n", exp));
    }
    out.push_str(&contracts_table("Calls", &chain.calls));
    out.push_str(&contracts_table("Puts", &chain.puts));
    out
}

fn contracts_table(title: &str, contracts: &[OptionContract]) -> String {
    let mut out = header(title);
    out.push_str(&format!(
        "{:<22} {:>9} {:>9} {:>9} {:>9} {:>9} {:>11} {:>8}\n",
        "Contract", "Strike", "Last", "Bid", "Ask", "Volume", "Open Int.", "IV"
    ));
    let num = |v: Option<f64>| v.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".to_string());
    let int = |v: Option<u64>| v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string());
    for c in contracts {
        let line = format!(
            "{:<22} {:>9.2} {:>9} {:>9} {:>9} {:>9} {:>11} {:>8}",
            c.contract_symbol,
            c.strike,
            num(c.last_price),
            num(c.bid),
            num(c.ask),
            int(c.volume),
            int(c.open_interest),
            format_percent(c.implied_volatility.map(|iv| iv * 100.0)),
        );
        if c.in_the_money {
            out.push_str(&line.green().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

pub fn ratings_view(ratings: &Result<Vec<RatingPeriod>, MarketError>) -> String {
    let mut out = header("Analyst Recommendations");
    let ratings = match ratings {
        Ok(r) if !r.is_empty() => r,
        Ok(_) => {
            out.push_str("No analyst ratings available.\n");
            return out;
        }
        Err(e) => {
            out.push_str(&format!("{}\n", placeholder(e.kind())));
            return out;
        }
    };

    let max = ratings
        .iter()
        .flat_map(|r| [r.strong_buy, r.buy, r.hold, r.sell, r.strong_sell])
        .max()
        .unwrap_or(0)
        .max(1);
    for period in ratings {
        out.push_str(&format!("{} ({} analysts)\n", period.period.bold(), period.total()));
        for (label, count) in [
            ("Strong Buy", period.strong_buy),
            ("Buy", period.buy),
            ("Hold", period.hold),
            ("Sell", period.sell),
            ("Strong Sell", period.strong_sell),
        ] {
            out.push_str(&format!("  {:<11} {:>3} {}\n", label, count, rating_bar(count, max)));
        }
    }
    out
}

/// Proportional bar of `#` characters.
fn rating_bar(count: u32, max: u32) -> String {
    "#".repeat((count * BAR_WIDTH / max) as usize)
}

pub fn news_view(news: &Result<Vec<NewsArticle>, MarketError>) -> String {
    let mut out = header("News");
    match news {
        Ok(list) if list.is_empty() => out.push_str("No news articles found.\n"),
        Ok(list) => {
            for article in list {
                out.push_str(&format!("Title: {}\n", article.title.as_deref().unwrap_or("No title available").bold()));
                out.push_str(&format!("Publisher: {}\n", article.publisher.as_deref().unwrap_or("No publisher available")));
                let published = article
                    .published
                    .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "No publication date available".to_string());
                out.push_str(&format!("Date Published: {}\n", published));
                out.push_str(&format!("URL: {}\n", article.url.as_deref().unwrap_or("URL not available")));
                out.push_str("---\n");
            }
        }
        Err(e) => {
            tracing::warn!("News unavailable: {}", e);
            out.push_str("No news articles found.\n");
        }
    }
    out
}

pub fn holders_view(holders: &Result<Vec<HolderShare>, MarketError>) -> String {
    let mut out = header("Major Holders");
    match holders {
        Ok(list) if list.is_empty() => out.push_str("No holders information available.\n"),
        Ok(list) => {
            for holder in list {
                out.push_str(&format!(
                    "{:<32} {:>8} {}\n",
                    holder.category,
                    format_percent(Some(holder.fraction * 100.0)),
                    rating_bar((holder.fraction.clamp(0.0, 1.0) * 100.0) as u32, 100)
                ));
            }
        }
        Err(e) => {
            tracing::warn!("Holders unavailable: {}", e);
            out.push_str("No holders information available.\n");
        }
    }
    out
}

pub fn history_view(symbol: &str, bars: &Result<Vec<PriceBar>, MarketError>) -> String {
    let mut out = header(&format!("{} daily prices", symbol));
    match bars {
        Ok(list) if list.is_empty() => out.push_str("No price history in the requested range.\n"),
        Ok(list) => {
            out.push_str(&format!("{:<10} {:>10} {:>10} {:>10} {:>10} {:>14}\n", "Date", "Open", "High", "Low", "Close", "Volume"));
            for bar in list {
                out.push_str(&format!(
                    "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14}\n",
                    bar.date.to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume.map(|v| with_commas(v as f64, 0)).unwrap_or_else(|| "-".to_string())
                ));
            }
        }
        Err(e) => {
            out.push_str(&format!("{}\n", placeholder(e.kind())));
        }
    }
    out
}

pub fn ai_view(company_name: &str, narrative: &NarrativeResult) -> String {
    let mut out = header(&format!("AI Overview: {}", company_name));
    out.push_str(&format!("{}\n", narrative));
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
