// src/ai/ollama.rs
use crate::ai::LanguageModel;
use crate::config::AppConfig;
use crate::utils::error::SummaryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Non-streaming client for a local Ollama server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    error: Option<String>,
}

impl OllamaClient {
    pub fn new(config: &AppConfig) -> Result<Self, SummaryError> {
        Ok(Self {
            http: config.ollama_http_client()?,
            base_url: config.ollama_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::info!("Requesting completion from {} ({} prompt chars)", self.model, prompt.chars().count());

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { model: &self.model, prompt, stream: false })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Ollama returned HTTP {}", status);
            return Err(SummaryError::Http(status));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::Malformed(e.to_string()))?;
        if let Some(err) = body.error {
            return Err(SummaryError::Malformed(err));
        }
        body.response
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| SummaryError::Malformed("empty response field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(base_url: String) -> OllamaClient {
        let config = AppConfig {
            ollama_url: base_url,
            model: "llama3.1".to_string(),
            ..AppConfig::default()
        };
        OllamaClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn posts_model_and_prompt_without_streaming() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama3.1",
                "prompt": "hello",
                "stream": false
            })))
            .with_status(200)
            .with_body(json!({"model": "llama3.1", "response": "- Hold.", "done": true}).to_string())
            .create_async()
            .await;

        let text = client(server.url()).generate("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "- Hold.");
    }

    #[tokio::test]
    async fn model_error_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"error":"model 'llama3.1' not found"}"#)
            .create_async()
            .await;

        let err = client(server.url()).generate("hello").await.unwrap_err();
        assert!(matches!(err, SummaryError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported() {
        // port 9 (discard) is closed on test hosts
        let err = client("http://127.0.0.1:9".to_string())
            .generate("hello")
            .await
            .unwrap_err();
        assert!(matches!(err, SummaryError::Unreachable(_)));
    }
}
