// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures that stop the process: bad configuration, client construction,
/// or writing the run output.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Outcome of a single index query attempt.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("index returned HTTP {status}: {body}")]
    Unavailable { status: u16, body: String },

    #[error("index reported zero total results")]
    EmptyResult,

    #[error("failed to parse index response: {0}")]
    Parse(String),

    #[error("network connection to index failed: {0}")]
    Connection(String),

    #[error("index request failed: {0}")]
    Transport(String),

    #[error("unexpected index failure: {0}")]
    Unexpected(String),
}

impl IndexError {
    /// `Parse` is kept for feed XML; a body reqwest itself fails to decode is a
    /// transport problem and stays retryable.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Unexpected(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Why a document could not be turned into text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("download returned HTTP {0}")]
    Status(u16),

    #[error("download failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Outcome of a single summarization attempt.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("inference endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference request failed: {0}")]
    Transport(String),

    #[error("unexpected summarization response format: {0}")]
    Format(String),
}

impl SummarizeError {
    /// A shape mismatch will not be fixed by asking again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Format(_))
    }
}
