// src/config.rs
use crate::utils::AppError;
use std::time::Duration;

pub const DEFAULT_SEC_BASE_URL: &str = "https://www.sec.gov";
// SEC requires an identifying User-Agent; override with EDGAR_USER_AGENT.
pub const DEFAULT_EDGAR_USER_AGENT: &str = "InvinciBull admin@example.com";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Endpoints and client settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sec_base_url: String,
    pub edgar_user_agent: String,
    pub ollama_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sec_base_url: DEFAULT_SEC_BASE_URL.to_string(),
            edgar_user_agent: DEFAULT_EDGAR_USER_AGENT.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl AppConfig {
    /// Normalizes base URLs (no trailing slash) and rejects anything that
    /// does not parse as an absolute URL.
    pub fn validated(mut self) -> Result<Self, AppError> {
        for (name, value) in [
            ("sec-base-url", &mut self.sec_base_url),
            ("ollama-url", &mut self.ollama_url),
        ] {
            let trimmed = value.trim().trim_end_matches('/').to_string();
            reqwest::Url::parse(&trimmed)
                .map_err(|e| AppError::Config(format!("invalid --{} '{}': {}", name, value, e)))?;
            *value = trimmed;
        }
        if self.edgar_user_agent.trim().is_empty() {
            return Err(AppError::Config("--user-agent must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::Config("--model must not be empty".to_string()));
        }
        Ok(self)
    }

    pub fn edgar_http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        self.build_client(&self.edgar_user_agent)
    }

    /// Client handed to the market data provider. Yahoo's crumb handshake
    /// needs a cookie store.
    pub fn yahoo_http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn ollama_http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        self.build_client(env!("CARGO_PKG_NAME"))
    }

    fn build_client(&self, user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_removed() {
        let config = AppConfig {
            sec_base_url: "https://www.sec.gov/".to_string(),
            ..AppConfig::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.sec_base_url, "https://www.sec.gov");
    }

    #[test]
    fn relative_urls_are_rejected() {
        let result = AppConfig {
            ollama_url: "localhost-no-scheme".to_string(),
            ..AppConfig::default()
        }
        .validated();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn empty_user_agent_is_rejected() {
        let result = AppConfig {
            edgar_user_agent: "  ".to_string(),
            ..AppConfig::default()
        }
        .validated();
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
