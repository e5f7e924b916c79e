// file: src/summarizer/retry.rs
// description: bounded retry around a single-attempt inference client
// reference: fixed-delay attempt loop on tokio::time

use super::InferenceClient;
use crate::config::SummarizerConfig;
use std::time::Duration;
use tracing::{error, info, warn};

pub struct Summarizer<C> {
    client: C,
    retry_delay: Duration,
}

impl<C: InferenceClient> Summarizer<C> {
    pub fn new(client: C, config: &SummarizerConfig) -> Self {
        Self::with_retry_delay(client, config.retry_delay())
    }

    pub fn with_retry_delay(client: C, retry_delay: Duration) -> Self {
        Self {
            client,
            retry_delay,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Makes at most `max_retries` attempts. Status and transport failures
    /// pause and retry; a malformed response or a blank summary ends the
    /// call immediately.
    pub async fn summarize(&self, text: &str, max_retries: u32) -> Option<String> {
        let mut attempt = 0;

        while attempt < max_retries {
            match self.client.summarize_once(text).await {
                Ok(summary) if summary.trim().is_empty() => {
                    error!("Empty summary received on attempt {}, not retrying", attempt + 1);
                    return None;
                }
                Ok(summary) => {
                    info!("Summary received on attempt {}", attempt + 1);
                    return Some(summary);
                }
                Err(e) if !e.is_retryable() => {
                    error!("Unexpected response format, not retrying: {}", e);
                    return None;
                }
                Err(e) => {
                    warn!("Attempt {}: Failed to summarize, {}", attempt + 1, e);
                }
            }

            attempt += 1;
            if attempt < max_retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        error!("Summarization failed after {} attempts", max_retries);
        None
    }
}
