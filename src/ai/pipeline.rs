// src/ai/pipeline.rs
use crate::ai::{summarize, AnalysisInput, LanguageModel, NarrativeResult};
use crate::edgar::{FilingRecord, PageFetcher};
use crate::extractors::{fetch_sec_filing_text, FilingText};
use crate::market::{CompanyProfile, FinancialSnapshot};
use crate::utils::error::{EdgarError, MarketError};

/// Market-side inputs of an analysis, already fetched by the caller.
pub struct CompanyData<'a> {
    pub symbol: &'a str,
    pub profile: &'a Result<CompanyProfile, MarketError>,
    pub quarterly_financials: &'a Result<FinancialSnapshot, MarketError>,
    pub quarterly_balance_sheet: &'a Result<FinancialSnapshot, MarketError>,
}

/// Pulls text from the first eligible filing, then asks `model` for the
/// overview. A failed filings listing still produces a prompt; only the
/// filing section carries the error.
pub async fn analyze_company(
    fetcher: &dyn PageFetcher,
    model: &dyn LanguageModel,
    filings: &Result<Vec<FilingRecord>, EdgarError>,
    valid_types: &[&str],
    company: &CompanyData<'_>,
) -> NarrativeResult {
    let filing_text = match filings {
        Ok(list) => fetch_sec_filing_text(fetcher, list, valid_types).await,
        Err(e) => {
            tracing::warn!("Analyzing {} without filing text: {}", company.symbol, e);
            FilingText::from_error(e)
        }
    };

    let input = AnalysisInput {
        symbol: company.symbol,
        profile: company.profile.as_ref().ok(),
        filing_text: &filing_text,
        quarterly_financials: company.quarterly_financials.as_ref().ok(),
        quarterly_balance_sheet: company.quarterly_balance_sheet.as_ref().ok(),
    };
    summarize(model, &input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{OllamaClient, AI_FALLBACK_MESSAGE};
    use crate::config::AppConfig;
    use crate::edgar::index::tests::INDEX_PAGE;
    use crate::edgar::EdgarClient;
    use crate::extractors::DEFAULT_VALID_TYPES;
    use crate::symbol::Symbol;
    use mockito::Matcher;
    use serde_json::json;

    const ANNUAL_REPORT_PATH: &str =
        "/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm";

    fn clients_for(server: &mockito::ServerGuard) -> (EdgarClient, OllamaClient) {
        let config = AppConfig {
            sec_base_url: server.url(),
            ollama_url: server.url(),
            ..AppConfig::default()
        };
        (
            EdgarClient::new(&config).unwrap().without_delay(),
            OllamaClient::new(&config).unwrap(),
        )
    }

    fn empty_company<'a>(
        profile: &'a Result<CompanyProfile, MarketError>,
        statements: &'a Result<FinancialSnapshot, MarketError>,
    ) -> CompanyData<'a> {
        CompanyData {
            symbol: "AAPL",
            profile,
            quarterly_financials: statements,
            quarterly_balance_sheet: statements,
        }
    }

    #[tokio::test]
    async fn filing_text_flows_from_index_into_prompt() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cgi-bin/browse-edgar")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(INDEX_PAGE)
            .create_async()
            .await;
        let filing = server
            .mock("GET", ANNUAL_REPORT_PATH)
            .with_status(200)
            .with_body("<html><body><p>Net sales rose   8 percent.</p><p> </p></body></html>")
            .create_async()
            .await;
        let ollama = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex("Net sales rose 8 percent.".to_string()))
            .with_status(200)
            .with_body(json!({"response": "- Buy: services growth."}).to_string())
            .create_async()
            .await;

        let (edgar, model) = clients_for(&server);
        let filings = edgar.get_sec_filings(&Symbol::parse("aapl").unwrap()).await;
        let profile = Ok(CompanyProfile::default());
        let statements = Ok(FinancialSnapshot::default());

        let result = analyze_company(
            &edgar,
            &model,
            &filings,
            &DEFAULT_VALID_TYPES,
            &empty_company(&profile, &statements),
        )
        .await;

        filing.assert_async().await;
        ollama.assert_async().await;
        assert_eq!(result, NarrativeResult::Generated("- Buy: services growth.".to_string()));
    }

    #[tokio::test]
    async fn failed_index_still_reaches_the_model() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cgi-bin/browse-edgar")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let ollama = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex("Error fetching SEC filing: HTTP error".to_string()))
            .with_status(200)
            .with_body(json!({"response": "- Hold."}).to_string())
            .create_async()
            .await;

        let (edgar, model) = clients_for(&server);
        let filings = edgar.get_sec_filings(&Symbol::parse("aapl").unwrap()).await;
        assert!(filings.is_err());
        let profile = Err(MarketError::NoData("AAPL".to_string()));
        let statements = Err(MarketError::MissingField("quarterly".to_string()));

        let result = analyze_company(
            &edgar,
            &model,
            &filings,
            &DEFAULT_VALID_TYPES,
            &empty_company(&profile, &statements),
        )
        .await;

        ollama.assert_async().await;
        assert_eq!(result.to_string(), "- Hold.");
    }

    #[tokio::test]
    async fn backend_error_yields_fallback_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model runner crashed")
            .create_async()
            .await;

        let (edgar, model) = clients_for(&server);
        let filings = Ok(Vec::new());
        let profile = Ok(CompanyProfile::default());
        let statements = Ok(FinancialSnapshot::default());

        let result = analyze_company(
            &edgar,
            &model,
            &filings,
            &DEFAULT_VALID_TYPES,
            &empty_company(&profile, &statements),
        )
        .await;

        assert_eq!(result.to_string(), AI_FALLBACK_MESSAGE);
    }
}
