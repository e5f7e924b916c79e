// file: src/pipeline/controller.rs
// description: drives the index query retry loop and sequential per-paper processing
// reference: explicit run state machine, persistence on every terminal state

use crate::config::Config;
use crate::document::DocumentSource;
use crate::error::{IndexError, Result};
use crate::exporter::{ExportManifest, JsonExporter};
use crate::index::PaperIndex;
use crate::models::{PaperRecord, RunOutput};
use crate::parser::TextSanitizer;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::summarizer::{InferenceClient, Summarizer};
use crate::utils::{OperationTimer, Validator};
use std::time::Duration;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

/// States of one run. `Succeeded`, `FatalParseFailure`, `Exhausted` and
/// `Aborted` are terminal; all of them end with the output being persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Querying,
    UnavailableRetry,
    EmptyRetry,
    NetworkRetry,
    ProcessingPapers,
    Succeeded,
    FatalParseFailure,
    Exhausted,
    Aborted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::FatalParseFailure | Self::Exhausted | Self::Aborted
        )
    }

    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }

    /// Where a failed query attempt leads.
    pub fn after_query_error(error: &IndexError) -> Self {
        match error {
            IndexError::Unavailable { .. } | IndexError::Transport(_) => Self::UnavailableRetry,
            IndexError::EmptyResult => Self::EmptyRetry,
            IndexError::Connection(_) => Self::NetworkRetry,
            IndexError::Parse(_) => Self::FatalParseFailure,
            IndexError::Unexpected(_) => Self::Aborted,
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub state: RunState,
    pub failed_attempts: u32,
    pub stats: PipelineStats,
    pub output: RunOutput,
    pub manifest: ExportManifest,
}

pub struct PipelineController<'a, I, D, C> {
    config: &'a Config,
    index: I,
    documents: D,
    summarizer: Summarizer<C>,
    sanitizer: TextSanitizer,
    exporter: JsonExporter,
    show_progress: bool,
}

impl<'a, I, D, C> PipelineController<'a, I, D, C>
where
    I: PaperIndex,
    D: DocumentSource,
    C: InferenceClient,
{
    pub fn new(config: &'a Config, index: I, documents: D, summarizer: Summarizer<C>) -> Result<Self> {
        let exporter = JsonExporter::new(&config.output)?;

        Ok(Self {
            config,
            index,
            documents,
            summarizer,
            sanitizer: TextSanitizer::with_encoding(config.output.storage_encoding),
            exporter,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn summarizer(&self) -> &Summarizer<C> {
        &self.summarizer
    }

    /// Runs to a terminal state and persists whatever was gathered. Only
    /// persistence failures are returned as errors.
    pub async fn run(&self) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        self.run_inner(run_id)
            .instrument(info_span!("run", %run_id))
            .await
    }

    async fn run_inner(&self, run_id: Uuid) -> Result<RunReport> {
        let timer = OperationTimer::new("arXiv digest run");
        let params = self.config.index.query_parameters();
        let max_attempts = self.config.index.max_attempts;

        let mut output = RunOutput::new();
        let mut stats = PipelineStats::new();
        let mut papers: Vec<PaperRecord> = Vec::new();
        let mut failed_attempts = 0u32;
        let mut queries = 0u32;
        let mut state = RunState::Querying;

        while !state.is_terminal() {
            state = match state {
                RunState::Querying => {
                    queries += 1;
                    match self.index.fetch(&params).await {
                        Ok(found) => {
                            info!("Successfully fetched {} papers from the index", found.len());
                            papers = found;
                            RunState::ProcessingPapers
                        }
                        Err(e) => {
                            failed_attempts += 1;
                            self.log_query_failure(&e, failed_attempts);
                            RunState::after_query_error(&e)
                        }
                    }
                }
                RunState::UnavailableRetry | RunState::EmptyRetry | RunState::NetworkRetry => {
                    if failed_attempts >= max_attempts {
                        RunState::Exhausted
                    } else {
                        let delay = self.backoff_for(state);
                        info!(
                            "Retrying index query in {}s (attempt {} of {})",
                            delay.as_secs(),
                            failed_attempts + 1,
                            max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        RunState::Querying
                    }
                }
                RunState::ProcessingPapers => {
                    stats = self.process_papers(&papers, &mut output).await;
                    RunState::Succeeded
                }
                RunState::Succeeded
                | RunState::FatalParseFailure
                | RunState::Exhausted
                | RunState::Aborted => state,
            };
        }

        self.log_outcome(state, max_attempts);

        let manifest = self.exporter.export(&output)?;

        stats.index_attempts = queries;
        stats.duration_secs = timer.elapsed().as_secs();
        timer.finish_with_count(stats.papers_returned);
        self.log_final_stats(&stats);

        Ok(RunReport {
            run_id,
            state,
            failed_attempts,
            stats,
            output,
            manifest,
        })
    }

    fn backoff_for(&self, state: RunState) -> Duration {
        match state {
            RunState::NetworkRetry => self.config.index.network_retry_delay(),
            _ => self.config.index.retry_delay(),
        }
    }

    async fn process_papers(&self, papers: &[PaperRecord], output: &mut RunOutput) -> PipelineStats {
        let progress = if self.show_progress {
            ProgressTracker::new(papers.len())
        } else {
            ProgressTracker::hidden(papers.len())
        };

        for paper in papers {
            progress.set_message(Validator::truncate_text(&paper.title, 60));
            self.process_paper(paper, output, &progress).await;
            progress.inc_paper_done();
        }

        let stats = progress.get_stats();
        progress.finish();
        stats
    }

    async fn process_paper(
        &self,
        paper: &PaperRecord,
        output: &mut RunOutput,
        progress: &ProgressTracker,
    ) {
        let Some(url) = paper.pdf_url.as_deref() else {
            info!("No PDF link for paper titled: {}", paper.title);
            progress.inc_without_pdf();
            return;
        };

        let Some(text) = self.documents.fetch(url).await else {
            progress.inc_extraction_failed();
            return;
        };

        if text.trim().is_empty() {
            warn!("No text could be extracted from {} ({})", url, paper.title);
            progress.inc_extraction_failed();
            return;
        }

        let sanitized = self.sanitizer.sanitize(&text);
        output.push_full_paper(paper.title.as_str(), sanitized.as_str());
        progress.inc_text_extracted();

        info!(
            "Using the inference API to summarize the paper titled: {}",
            paper.title
        );
        match self
            .summarizer
            .summarize(&sanitized, self.config.summarizer.max_retries)
            .await
        {
            Some(summary) => {
                output.push_summary(paper.title.as_str(), summary);
                progress.inc_summary_created();
            }
            None => {
                error!("Failed to generate a summary for the paper titled: {}", paper.title);
                progress.inc_summary_failed();
            }
        }
    }

    fn log_query_failure(&self, error: &IndexError, attempt: u32) {
        match error {
            IndexError::Unavailable { status, body } => error!(
                "Failed to fetch data from the index. Status code: {}, Response: {}",
                status, body
            ),
            IndexError::EmptyResult => {
                warn!("Attempt {}: The API returned 0 results. Retrying...", attempt)
            }
            IndexError::Parse(msg) => error!("Failed to parse XML from index response: {}", msg),
            IndexError::Connection(msg) => error!(
                "Network error occurred while fetching papers (attempt {}): {}",
                attempt, msg
            ),
            IndexError::Transport(msg) => {
                error!("Index request failed (attempt {}): {}", attempt, msg)
            }
            IndexError::Unexpected(msg) => {
                error!("Unexpected error while querying the index: {}", msg)
            }
        }
    }

    fn log_outcome(&self, state: RunState, max_attempts: u32) {
        match state {
            RunState::Succeeded => info!("Successful fetch and processing of index results"),
            RunState::FatalParseFailure => {
                error!("Index response could not be parsed; not retrying")
            }
            RunState::Exhausted => error!(
                "Reached maximum attempts ({}) to fetch papers without success",
                max_attempts
            ),
            RunState::Aborted => error!("Run aborted after an unexpected index failure"),
            RunState::Querying
            | RunState::UnavailableRetry
            | RunState::EmptyRetry
            | RunState::NetworkRetry
            | RunState::ProcessingPapers => {}
        }
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Digest Run Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Index queries: {}", stats.index_attempts);
        info!("Papers returned: {}", stats.papers_returned);
        info!("Papers without PDF: {}", stats.papers_without_pdf);
        info!("Full texts extracted: {}", stats.texts_extracted);
        info!("Extraction failures: {}", stats.extraction_failures);
        info!("Summaries created: {}", stats.summaries_created);
        info!("Summary failures: {}", stats.summary_failures);
        info!("Summary rate: {:.2}%", stats.summary_rate());
        info!("Throughput: {:.2} papers/minute", stats.papers_per_minute());
        info!("==========================");
    }
}
