// file: src/index/mod.rs
// description: literature index access
// reference: internal module structure

mod client;

pub use client::PaperIndexClient;

use crate::error::IndexError;
use crate::models::{PaperRecord, QueryParameters};
use async_trait::async_trait;

/// A searchable index of papers. Implementations make exactly one attempt per
/// call and classify the outcome; retrying is the caller's decision.
#[async_trait]
pub trait PaperIndex: Send + Sync {
    async fn fetch(&self, params: &QueryParameters) -> Result<Vec<PaperRecord>, IndexError>;
}
