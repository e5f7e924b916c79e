// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod document;
pub mod error;
pub mod exporter;
pub mod index;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod summarizer;
pub mod utils;

pub use config::{Config, FetcherConfig, IndexConfig, LoggingConfig, OutputConfig, SummarizerConfig};
pub use document::{DocumentFetcher, DocumentSource};
pub use error::{FetchError, IndexError, PipelineError, Result, SummarizeError};
pub use exporter::{ExportManifest, JsonExporter};
pub use index::{PaperIndex, PaperIndexClient};
pub use models::{FullPaperRecord, PaperRecord, QueryParameters, RunOutput, SummaryRecord};
pub use parser::{StorageEncoding, TextSanitizer};
pub use pipeline::{PipelineController, PipelineStats, ProgressTracker, RunReport, RunState};
pub use summarizer::{HuggingFaceClient, InferenceClient, Summarizer};
pub use utils::{OperationTimer, Validator};
