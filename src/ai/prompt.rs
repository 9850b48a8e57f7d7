// src/ai/prompt.rs
use crate::extractors::FilingText;
use crate::market::{CompanyProfile, FinancialSnapshot};

const NO_DATA: &str = "No data available.";

const PROMPT_TEMPLATE: &str = r#"Analyze the following financial data for {company_name} and provide insights:
    1. Read through:
        Company Info:
        {company_info}

        SEC Filing Highlights:
        {filing_text}

        Quarterly Financial Statements (QFS):
        {qfs}

        Quarterly Balance Sheet (QBS):
        {qbs}
    2. Key performance indicators (KPIs) (e.g., revenue growth, profit margins, cash flow).
    3. Recent stock performance and key drivers behind fluctuations.
    4. SWOT analysis (Strengths, Weaknesses, Opportunities, Threats).
    5. Future outlook and risks based on current market trends and company trajectory.
Include actionable recommendations for portfolio strategy: Should we buy, sell, or hold? Justify your suggestion based on quantitative and qualitative factors. Provide all insights in a clear, bullet-point format for quick review."#;

/// Everything the analysis prompt is built from.
pub struct AnalysisInput<'a> {
    pub symbol: &'a str,
    pub profile: Option<&'a CompanyProfile>,
    pub filing_text: &'a FilingText,
    pub quarterly_financials: Option<&'a FinancialSnapshot>,
    pub quarterly_balance_sheet: Option<&'a FinancialSnapshot>,
}

/// Fills the fixed five-part analysis template.
pub fn build_prompt(input: &AnalysisInput<'_>) -> String {
    let company_name = input
        .profile
        .and_then(|p| p.short_name.as_deref())
        .unwrap_or(input.symbol);

    // Substitute the scraped text last so braces inside it are never treated
    // as placeholders.
    PROMPT_TEMPLATE
        .replace("{company_name}", company_name)
        .replace("{company_info}", &company_info(input.profile))
        .replace("{qfs}", &snapshot_text(input.quarterly_financials))
        .replace("{qbs}", &snapshot_text(input.quarterly_balance_sheet))
        .replace("{filing_text}", &input.filing_text.to_string())
}

fn company_info(profile: Option<&CompanyProfile>) -> String {
    let Some(profile) = profile else {
        return NO_DATA.to_string();
    };
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "Not available".to_string());
    let address = profile.address();
    [
        format!("Name: {}", or_na(&profile.short_name)),
        format!(
            "Headquarters: {}",
            if address.is_empty() { "Not available" } else { address.as_str() }
        ),
        format!("Website: {}", or_na(&profile.website)),
        format!("Business Summary: {}", or_na(&profile.business_summary)),
    ]
    .join("\n")
}

fn snapshot_text(snapshot: Option<&FinancialSnapshot>) -> String {
    match snapshot {
        Some(s) if !s.is_empty() => s.to_plain_text(),
        _ => NO_DATA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::QuarterRow;
    use chrono::NaiveDate;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            short_name: Some("Apple Inc.".into()),
            city: Some("Cupertino".into()),
            state: Some("CA".into()),
            country: Some("United States".into()),
            website: Some("https://www.apple.com".into()),
            business_summary: Some("Designs phones.".into()),
            ..Default::default()
        }
    }

    #[test]
    fn prompt_contains_every_section() {
        let profile = profile();
        let filing = FilingText::Extracted {
            filing_type: "10-K".into(),
            date: "2023-11-03".into(),
            text: "Net sales decreased {slightly}.".into(),
        };
        let qfs = FinancialSnapshot {
            line_items: vec!["totalRevenue".into()],
            quarters: vec![QuarterRow {
                period_end: NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
                values: vec![Some(90753000000.0)],
            }],
        };
        let prompt = build_prompt(&AnalysisInput {
            symbol: "AAPL",
            profile: Some(&profile),
            filing_text: &filing,
            quarterly_financials: Some(&qfs),
            quarterly_balance_sheet: None,
        });

        assert!(prompt.starts_with("Analyze the following financial data for Apple Inc."));
        assert!(prompt.contains("Headquarters: Cupertino, CA, United States"));
        assert!(prompt.contains("Net sales decreased {slightly}."));
        assert!(prompt.contains("2024-03-30\t90753000000"));
        assert!(prompt.contains("Quarterly Balance Sheet (QBS):\n        No data available."));
        assert!(prompt.contains("4. SWOT analysis"));
        assert!(!prompt.contains("{qfs}"));
    }

    #[test]
    fn missing_profile_falls_back_to_symbol() {
        let filing = FilingText::NoRelevantFilings;
        let prompt = build_prompt(&AnalysisInput {
            symbol: "MSFT",
            profile: None,
            filing_text: &filing,
            quarterly_financials: None,
            quarterly_balance_sheet: None,
        });
        assert!(prompt.starts_with("Analyze the following financial data for MSFT"));
        assert!(prompt.contains("No relevant SEC filings available."));
    }
}
