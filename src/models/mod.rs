// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod output;
pub mod paper;

pub use output::{FullPaperRecord, RunOutput, SummaryRecord};
pub use paper::{PaperRecord, QueryParameters};
