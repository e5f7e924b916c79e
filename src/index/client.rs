// file: src/index/client.rs
// description: arXiv export API client returning classified query outcomes
// reference: https://info.arxiv.org/help/api/user-manual.html

use super::PaperIndex;
use crate::config::{FetcherConfig, IndexConfig};
use crate::error::{IndexError, Result};
use crate::models::{PaperRecord, QueryParameters};
use crate::parser::parse_feed;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

pub struct PaperIndexClient {
    client: Client,
    base_url: String,
}

impl PaperIndexClient {
    pub fn new(index: &IndexConfig, fetcher: &FetcherConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = fetcher.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: index.base_url.clone(),
        })
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PaperIndex for PaperIndexClient {
    async fn fetch(
        &self,
        params: &QueryParameters,
    ) -> std::result::Result<Vec<PaperRecord>, IndexError> {
        debug!(
            "Querying index {} with search_query={} sortBy={} sortOrder={} max_results={}",
            self.base_url,
            params.search_query(),
            params.sort_by(),
            params.sort_order(),
            params.max_results()
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&params.as_query_pairs()[..])
            .send()
            .await
            .map_err(IndexError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(IndexError::from_reqwest)?;
        let feed = parse_feed(&body)?;

        if feed.total_results == 0 {
            return Err(IndexError::EmptyResult);
        }

        info!(
            "Index reported {} total results, {} entries returned",
            feed.total_results,
            feed.papers.len()
        );

        Ok(feed.papers)
    }
}
