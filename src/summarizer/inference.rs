// file: src/summarizer/inference.rs
// description: HuggingFace inference API integration for abstractive summaries
// reference: https://huggingface.co/docs/api-inference/tasks/summarization

use super::InferenceClient;
use crate::config::{FetcherConfig, SummarizerConfig};
use crate::error::{Result, SummarizeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerationParameters {
    min_length: u32,
    max_length: u32,
}

pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    parameters: GenerationParameters,
}

impl HuggingFaceClient {
    pub fn new(config: &SummarizerConfig, fetcher: &FetcherConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = fetcher.request_timeout() {
            builder = builder.timeout(timeout);
        }

        if config.api_token.is_none() {
            warn!("No inference API token configured; requests will be sent unauthenticated");
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            parameters: GenerationParameters {
                min_length: config.min_length,
                max_length: config.max_length,
            },
        })
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    async fn summarize_once(&self, text: &str) -> std::result::Result<String, SummarizeError> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: self.parameters,
        };

        debug!("Requesting summary for {} chars", text.len());

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SummarizeError::Transport(e.to_string()))?;
        debug!("Raw summarization response: {}", body);

        extract_summary(&body)
    }
}

/// Pulls a non-blank `summary_text` out of the first element of a JSON array body.
pub(crate) fn extract_summary(body: &str) -> std::result::Result<String, SummarizeError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SummarizeError::Format(format!("response is not JSON: {}", e)))?;

    let first = value
        .as_array()
        .ok_or_else(|| SummarizeError::Format("response is not an array".to_string()))?
        .first()
        .ok_or_else(|| SummarizeError::Format("response array is empty".to_string()))?;

    let summary = first
        .get("summary_text")
        .and_then(Value::as_str)
        .ok_or_else(|| SummarizeError::Format("'summary_text' key not found".to_string()))?;

    if summary.trim().is_empty() {
        return Err(SummarizeError::Format("'summary_text' is empty".to_string()));
    }

    Ok(summary.to_string())
}
