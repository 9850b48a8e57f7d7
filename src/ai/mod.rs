// src/ai/mod.rs
pub mod ollama;
pub mod pipeline;
pub mod prompt;

use crate::utils::error::{ErrorKind, SummaryError};
use async_trait::async_trait;
use std::fmt;

pub use ollama::OllamaClient;
pub use pipeline::{analyze_company, CompanyData};
pub use prompt::{build_prompt, AnalysisInput};

pub const AI_FALLBACK_MESSAGE: &str =
    "AI Overview could not be generated. Please check the data or API configuration.";

/// A text-completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, SummaryError>;
}

/// Model output, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeResult {
    Generated(String),
    Unavailable(ErrorKind),
}

impl fmt::Display for NarrativeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeResult::Generated(text) => f.write_str(text),
            NarrativeResult::Unavailable(_) => f.write_str(AI_FALLBACK_MESSAGE),
        }
    }
}

/// Builds the analysis prompt and asks `model` for a narrative.
/// Backend failures are logged and turned into the fixed fallback.
pub async fn summarize(model: &dyn LanguageModel, input: &AnalysisInput<'_>) -> NarrativeResult {
    let prompt = build_prompt(input);
    match model.generate(&prompt).await {
        Ok(text) => NarrativeResult::Generated(text),
        Err(e) => {
            tracing::error!("AI overview failed: {}", e);
            NarrativeResult::Unavailable(e.kind())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::FilingText;
    use std::sync::Mutex;

    struct FailingModel;

    #[async_trait]
    impl LanguageModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, SummaryError> {
            Err(SummaryError::Malformed("connection reset".to_string()))
        }
    }

    #[derive(Default)]
    struct EchoModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("- Buy.".to_string())
        }
    }

    fn input(filing: &FilingText) -> AnalysisInput<'_> {
        AnalysisInput {
            symbol: "AAPL",
            profile: None,
            filing_text: filing,
            quarterly_financials: None,
            quarterly_balance_sheet: None,
        }
    }

    #[tokio::test]
    async fn failing_backend_yields_fixed_message() {
        let filing = FilingText::NoRelevantFilings;
        let result = summarize(&FailingModel, &input(&filing)).await;
        assert_eq!(result, NarrativeResult::Unavailable(ErrorKind::BackendUnavailable));
        assert_eq!(result.to_string(), AI_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn model_output_is_returned_verbatim() {
        let model = EchoModel::default();
        let filing = FilingText::NoRelevantFilings;
        let result = summarize(&model, &input(&filing)).await;
        assert_eq!(result.to_string(), "- Buy.");
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("No relevant SEC filings available."));
    }
}
