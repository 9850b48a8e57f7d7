// src/dashboard/page.rs
//! Standalone HTML export of the dashboard: the chart widgets plus the
//! company, financials, filings and AI sections rendered from fetched data.
use crate::ai::NarrativeResult;
use crate::dashboard::format::*;
use crate::dashboard::views::placeholder;
use crate::dashboard::widgets;
use crate::edgar::FilingRecord;
use crate::market::performance::Performance;
use crate::market::{CompanyProfile, FinancialSnapshot, QuoteSnapshot};
use crate::symbol::Symbol;
use crate::utils::error::{EdgarError, MarketError};
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
body { background: #131722; color: #d1d4dc; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 2rem; }
h1, h2 { color: #f0f3fa; }
.grid { display: flex; flex-wrap: wrap; gap: 1.5rem; }
.card { background: #1e222d; border-radius: 6px; padding: 1rem 1.5rem; }
table { border-collapse: collapse; }
td, th { padding: 0.25rem 0.75rem; border-bottom: 1px solid #2a2e39; text-align: right; }
td:first-child, th:first-child { text-align: left; }
a { color: #2962ff; }
.muted { color: #787b86; }
pre { white-space: pre-wrap; }
"#;

/// Everything fetched for one dashboard export.
pub struct DashboardData {
    pub symbol: Symbol,
    pub futures_symbol: String,
    pub profile: Result<CompanyProfile, MarketError>,
    pub quote: Result<QuoteSnapshot, MarketError>,
    pub performance: Result<Performance, MarketError>,
    pub quarterly_balance_sheet: Result<FinancialSnapshot, MarketError>,
    pub quarterly_financials: Result<FinancialSnapshot, MarketError>,
    pub filings: Result<Vec<FilingRecord>, EdgarError>,
    /// `None` when the overview was not requested.
    pub narrative: Option<NarrativeResult>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardData {
    pub fn company_name(&self) -> &str {
        self.profile
            .as_ref()
            .ok()
            .and_then(|p| p.short_name.as_deref())
            .unwrap_or(self.symbol.as_str())
    }
}

pub fn render_page(data: &DashboardData) -> String {
    let mut html = String::new();
    let title = format!("InvinciBull: {}", data.company_name());
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        encode_text(&title),
        STYLE
    ));

    html.push_str(&widgets::ticker_tape());
    html.push_str(&company_section(data));

    html.push_str("<div class=\"grid\">\n");
    html.push_str(&format!("<div class=\"card\" style=\"width:350px;height:220px\">{}</div>\n", widgets::mini_symbol_overview(data.symbol.as_str())));
    html.push_str(&format!("<div class=\"card\">{}</div>\n", widgets::advanced_chart(data.symbol.as_str(), 1000, 620)));
    html.push_str("</div>\n");

    html.push_str("<h2>Financials</h2>\n<div class=\"grid\">\n");
    html.push_str(&format!("<div class=\"card\">{}</div>\n", widgets::financials(data.symbol.as_str())));
    html.push_str("<div class=\"card\">\n");
    html.push_str(&statement_table(
        "Quarterly Balance Sheet",
        "Quarterly Balance Sheet (QBS) data is not available.",
        &data.quarterly_balance_sheet,
    ));
    html.push_str(&statement_table(
        "Quarterly Financial Statements",
        "Quarterly Financial Statements (QFS) data is not available.",
        &data.quarterly_financials,
    ));
    html.push_str("</div>\n</div>\n");

    html.push_str(&filings_section(&data.filings));

    html.push_str("<h2>Markets</h2>\n<div class=\"grid\">\n");
    html.push_str(&format!("<div class=\"card\">{}</div>\n", widgets::advanced_chart(&data.futures_symbol, 700, 450)));
    html.push_str(&format!("<div class=\"card\">{}</div>\n", widgets::events_calendar()));
    html.push_str("</div>\n");

    if let Some(narrative) = &data.narrative {
        html.push_str(&format!(
            "<h2>AI Overview: {}</h2>\n<div class=\"card\"><pre>{}</pre></div>\n",
            encode_text(data.company_name()),
            encode_text(&narrative.to_string())
        ));
    }

    html.push_str(&format!(
        "<p class=\"muted\">Generated {}</p>\n</body>\n</html>\n",
        data.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html
}

fn company_section(data: &DashboardData) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h1>{}</h1>\n<div class=\"card\">\n", encode_text(data.company_name())));

    match &data.profile {
        Ok(profile) => {
            let address = profile.address();
            if !address.is_empty() {
                out.push_str(&format!("<p>{}</p>\n", encode_text(&address)));
            }
            match &profile.website {
                Some(site) => {
                    out.push_str(&format!(
                        "<p>🔗 <a href=\"{}\" target=\"_blank\">{}</a></p>\n",
                        encode_double_quoted_attribute(site),
                        encode_text(&clean_website(site))
                    ));
                }
                None => out.push_str("<p>Website: Not available</p>\n"),
            }
        }
        Err(e) => {
            out.push_str(&format!("<p class=\"muted\">{}</p>\n", encode_text(placeholder(e.kind()))));
        }
    }

    out.push_str("<table>\n");
    match &data.quote {
        Ok(q) => {
            let rows = [
                ("Price", q.last_price.map(format_price).unwrap_or_else(|| NOT_AVAILABLE.into())),
                ("Shares Out", q.shares_outstanding.map(format_shares).unwrap_or_else(|| NOT_AVAILABLE.into())),
                ("Market Cap", format_optional_money(q.market_cap)),
                ("Enterprise Value", format_optional_money(q.enterprise_value)),
            ];
            for (label, value) in rows {
                out.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", label, encode_text(&value)));
            }
        }
        Err(e) => {
            out.push_str(&format!("<tr><td>Quote</td><td>{}</td></tr>\n", encode_text(placeholder(e.kind()))));
        }
    }
    if let Ok(p) = &data.performance {
        for (label, value) in [("3mo", p.three_month), ("6mo", p.six_month), ("YTD", p.ytd), ("1yr", p.one_year)] {
            out.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>\n", label, format_percent(value)));
        }
    }
    out.push_str("</table>\n");

    if let Ok(profile) = &data.profile {
        let summary = profile.business_summary.as_deref().unwrap_or("Business summary not available.");
        out.push_str(&format!("<h2>About</h2>\n<p>{}</p>\n", encode_text(summary)));

        out.push_str("<h2>Officers</h2>\n");
        if profile.officers.is_empty() {
            out.push_str("<p>No officers information available.</p>\n");
        } else {
            out.push_str("<ul>\n");
            for officer in &profile.officers {
                out.push_str(&format!(
                    "<li><strong>{}</strong>: {}</li>\n",
                    encode_text(&officer.name),
                    encode_text(&officer.title)
                ));
            }
            out.push_str("</ul>\n");
        }
        out.push_str(&format!(
            "<p>Employees: {}</p>\n",
            encode_text(&format_employees(profile.full_time_employees))
        ));
    }

    out.push_str("</div>\n");
    out
}

fn statement_table(title: &str, unavailable: &str, snapshot: &Result<FinancialSnapshot, MarketError>) -> String {
    let mut out = format!("<h3>{}</h3>\n", title);
    let snapshot = match snapshot {
        Ok(s) if !s.is_empty() => s,
        _ => {
            out.push_str(&format!("<p class=\"muted\">{}</p>\n", unavailable));
            return out;
        }
    };

    let headings: Vec<String> = snapshot.line_items.iter().map(|i| format!("<th>{}</th>", encode_text(i))).collect();
    out.push_str(&format!("<table>\n<tr><th>Quarter</th>{}</tr>\n", headings.concat()));
    for row in &snapshot.quarters {
        let cells: Vec<String> = row.values.iter().map(|v| format!("<td>{}</td>", format_currency_cell(*v))).collect();
        out.push_str(&format!("<tr><td>{}</td>{}</tr>\n", quarter_label(row.period_end), cells.concat()));
    }
    out.push_str("</table>\n");
    out
}

fn filings_section(filings: &Result<Vec<FilingRecord>, EdgarError>) -> String {
    let mut out = String::from("<h2>Most Recent SEC Filings:</h2>\n<div class=\"card\">\n");
    match filings {
        Ok(list) if !list.is_empty() => {
            out.push_str("<table>\n<tr><th>Type</th><th>Description</th><th>Date</th></tr>\n");
            for filing in list {
                out.push_str(&format!(
                    "<tr><td><a href=\"{}\" target=\"_blank\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                    encode_double_quoted_attribute(&filing.document_url),
                    encode_text(&filing.filing_type),
                    encode_text(&filing.description),
                    encode_text(&filing.date)
                ));
            }
            out.push_str("</table>\n");
        }
        Ok(_) => out.push_str("<p class=\"muted\">No filings listed.</p>\n"),
        Err(e) => {
            out.push_str(&format!("<p class=\"muted\">{}</p>\n", encode_text(placeholder(e.kind()))));
        }
    }
    out.push_str("</div>\n");
    out
}
