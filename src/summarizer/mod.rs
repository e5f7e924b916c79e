// file: src/summarizer/mod.rs
// description: text summarization through a hosted inference endpoint
// reference: internal module structure

mod inference;
mod retry;

pub use inference::HuggingFaceClient;
pub use retry::Summarizer;

use crate::error::SummarizeError;
use async_trait::async_trait;

/// One summarization request against an inference backend, no retries.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn summarize_once(&self, text: &str) -> Result<String, SummarizeError>;
}
