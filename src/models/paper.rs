// file: src/models/paper.rs
// description: index query parameters and paper metadata records
// reference: arXiv API user manual, query interface

use serde::{Deserialize, Serialize};

/// One index query. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    search_query: String,
    sort_by: String,
    sort_order: String,
    max_results: u32,
}

impl QueryParameters {
    pub fn new(
        search_query: impl Into<String>,
        sort_by: impl Into<String>,
        sort_order: impl Into<String>,
        max_results: u32,
    ) -> Self {
        Self {
            search_query: search_query.into(),
            sort_by: sort_by.into(),
            sort_order: sort_order.into(),
            max_results,
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn sort_order(&self) -> &str {
        &self.sort_order
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Query string pairs in the order and spelling the index expects.
    pub fn as_query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("search_query", self.search_query.clone()),
            ("sortBy", self.sort_by.clone()),
            ("sortOrder", self.sort_order.clone()),
            ("max_results", self.max_results.to_string()),
        ]
    }
}

/// A paper entry as returned by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub abstract_text: String,
    pub pdf_url: Option<String>,
}

impl PaperRecord {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        pdf_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            pdf_url,
        }
    }
}
