// file: src/document/mod.rs
// description: document retrieval and text extraction
// reference: internal module structure

mod fetcher;
pub mod pdf;

pub use fetcher::DocumentFetcher;

use async_trait::async_trait;

/// Source of full document text. `None` means the text could not be
/// obtained; the reason has already been logged. `Some("")` is a document
/// that was retrieved but had no extractable text.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}
