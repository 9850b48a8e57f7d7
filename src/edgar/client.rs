// src/edgar/client.rs
use crate::config::AppConfig;
use crate::edgar::index::{index_url, parse_filings_index};
use crate::edgar::models::FilingRecord;
use crate::symbol::Symbol;
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;

// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const EDGAR_REQUEST_DELAY_MS: u64 = 150;

/// Retrieves a page body as text. The filings pipeline talks to EDGAR only
/// through this seam.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, EdgarError>;
}

/// EDGAR HTTP client carrying the mandatory identifying User-Agent.
pub struct EdgarClient {
    http: reqwest::Client,
    base_url: String,
    request_delay: Duration,
}

impl EdgarClient {
    pub fn new(config: &AppConfig) -> Result<Self, EdgarError> {
        Ok(Self {
            http: config.edgar_http_client()?,
            base_url: config.sec_base_url.clone(),
            request_delay: Duration::from_millis(EDGAR_REQUEST_DELAY_MS),
        })
    }

    #[cfg(test)]
    pub(crate) fn without_delay(mut self) -> Self {
        self.request_delay = Duration::ZERO;
        self
    }

    /// Fetches the company browse page for `symbol` and parses its filings table.
    pub async fn get_sec_filings(&self, symbol: &Symbol) -> Result<Vec<FilingRecord>, EdgarError> {
        let url = index_url(&self.base_url, symbol);
        tracing::info!("Fetching SEC filings index for {}", symbol);
        let html = self.fetch_page(&url).await?;
        let filings = parse_filings_index(&html, &self.base_url)?;
        tracing::info!("Found {} filings for {}", filings.len(), symbol);
        Ok(filings)
    }
}

#[async_trait]
impl PageFetcher for EdgarClient {
    /// Downloads a page with basic rate limiting and status mapping.
    async fn fetch_page(&self, url: &str) -> Result<String, EdgarError> {
        tracing::debug!("Downloading document from: {}", url);

        // --- Basic Rate Limiting ---
        // Single sequential requests per invocation, so a fixed delay suffices.
        tokio::time::sleep(self.request_delay).await;

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,text/plain,*/*")
            .send()
            .await?; // Propagates reqwest::Error as EdgarError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
                return Err(EdgarError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::FilingDocNotFound(url.to_string()));
            }
            return Err(EdgarError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
