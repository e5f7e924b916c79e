// file: src/pipeline/mock.rs
// description: hand-rolled test doubles for the index, document and inference seams
// reference: https://docs.rs/async-trait

use crate::document::DocumentSource;
use crate::error::{IndexError, SummarizeError};
use crate::index::PaperIndex;
use crate::models::{PaperRecord, QueryParameters};
use crate::summarizer::InferenceClient;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pops responses in order, repeating the last one once the sequence is spent.
struct Sequence<T: Clone> {
    remaining: Mutex<Vec<T>>,
    last: T,
}

impl<T: Clone> Sequence<T> {
    fn new(mut responses: Vec<T>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        responses.reverse();
        let last = responses[0].clone();
        Self {
            remaining: Mutex::new(responses),
            last,
        }
    }

    fn next(&self) -> T {
        self.remaining
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| self.last.clone())
    }
}

#[derive(Clone, Debug)]
pub enum MockQuery {
    Papers(Vec<PaperRecord>),
    Empty,
    Unavailable(u16),
    Malformed,
    ConnectionLost,
    Transport,
    Unexpected,
}

pub struct MockIndex {
    responses: Sequence<MockQuery>,
    call_count: AtomicUsize,
}

impl MockIndex {
    pub fn new(response: MockQuery) -> Self {
        Self::with_sequence(vec![response])
    }

    pub fn with_sequence(responses: Vec<MockQuery>) -> Self {
        Self {
            responses: Sequence::new(responses),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaperIndex for MockIndex {
    async fn fetch(&self, _params: &QueryParameters) -> Result<Vec<PaperRecord>, IndexError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.responses.next() {
            MockQuery::Papers(papers) => Ok(papers),
            MockQuery::Empty => Err(IndexError::EmptyResult),
            MockQuery::Unavailable(status) => Err(IndexError::Unavailable {
                status,
                body: String::new(),
            }),
            MockQuery::Malformed => Err(IndexError::Parse("unexpected end of input".into())),
            MockQuery::ConnectionLost => Err(IndexError::Connection("connection refused".into())),
            MockQuery::Transport => Err(IndexError::Transport("operation timed out".into())),
            MockQuery::Unexpected => Err(IndexError::Unexpected("relative URL without a base".into())),
        }
    }
}

/// Serves fixed texts per URL; unknown URLs behave like failed downloads.
#[derive(Default)]
pub struct MockDocuments {
    texts: HashMap<String, String>,
    call_count: AtomicUsize,
}

impl MockDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.texts.insert(url.to_string(), text.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for MockDocuments {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.texts.get(url).cloned()
    }
}

#[derive(Clone, Debug)]
pub enum MockSummary {
    Text(String),
    Status(u16),
    Transport,
    Format,
}

pub struct MockInference {
    responses: Sequence<MockSummary>,
    call_count: AtomicUsize,
}

impl MockInference {
    pub fn new(response: MockSummary) -> Self {
        Self::with_sequence(vec![response])
    }

    pub fn with_sequence(responses: Vec<MockSummary>) -> Self {
        Self {
            responses: Sequence::new(responses),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceClient for MockInference {
    async fn summarize_once(&self, _text: &str) -> Result<String, SummarizeError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.responses.next() {
            MockSummary::Text(summary) => Ok(summary),
            MockSummary::Status(status) => Err(SummarizeError::Status {
                status,
                body: String::new(),
            }),
            MockSummary::Transport => Err(SummarizeError::Transport("connection reset".into())),
            MockSummary::Format => Err(SummarizeError::Format("'summary_text' key not found".into())),
        }
    }
}
