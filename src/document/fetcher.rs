// file: src/document/fetcher.rs
// description: downloads PDFs and extracts their text
// reference: reqwest download, lopdf extraction on the blocking pool

use super::DocumentSource;
use super::pdf;
use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Like [`DocumentSource::fetch`] but keeps the failure reason.
    pub async fn try_fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes from {}", bytes.len(), url);

        let text = tokio::task::spawn_blocking(move || pdf::extract_text(&bytes)).await??;
        Ok(text)
    }
}

#[async_trait]
impl DocumentSource for DocumentFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(text) => Some(text),
            Err(FetchError::Status(status)) => {
                error!("Failed to download PDF: {} (status {})", url, status);
                None
            }
            Err(e) => {
                error!("Error downloading or extracting PDF from {}: {}", url, e);
                None
            }
        }
    }
}
