// file: src/models/output.rs
// description: records accumulated during a run and persisted at its end
// reference: https://docs.rs/serde/latest/serde/derive.Serialize.html

use serde::{Deserialize, Serialize};

/// Title plus sanitized full text of a paper whose PDF was extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullPaperRecord {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    pub summary: String,
}

/// Everything a run produces. Only ever appended to, and written once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    full_papers: Vec<FullPaperRecord>,
    summaries: Vec<SummaryRecord>,
}

impl RunOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_full_paper(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.full_papers.push(FullPaperRecord {
            title: title.into(),
            text: text.into(),
        });
    }

    pub fn push_summary(&mut self, title: impl Into<String>, summary: impl Into<String>) {
        self.summaries.push(SummaryRecord {
            title: title.into(),
            summary: summary.into(),
        });
    }

    pub fn full_papers(&self) -> &[FullPaperRecord] {
        &self.full_papers
    }

    pub fn summaries(&self) -> &[SummaryRecord] {
        &self.summaries
    }

    pub fn is_empty(&self) -> bool {
        self.full_papers.is_empty() && self.summaries.is_empty()
    }

    /// True when every summary has a full-paper entry with the same title.
    pub fn summaries_have_texts(&self) -> bool {
        self.summaries
            .iter()
            .all(|s| self.full_papers.iter().any(|p| p.title == s.title))
    }
}
