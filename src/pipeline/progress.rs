// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for a digest run
// reference: uses indicatif for progress bars and tracks per-paper outcomes

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub index_attempts: u32,
    pub papers_returned: usize,
    pub papers_without_pdf: usize,
    pub texts_extracted: usize,
    pub extraction_failures: usize,
    pub summaries_created: usize,
    pub summary_failures: usize,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn papers_per_minute(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.papers_returned as f64 * 60.0 / self.duration_secs as f64
    }

    /// Share of extracted texts that also got a summary.
    pub fn summary_rate(&self) -> f64 {
        if self.texts_extracted == 0 {
            return 0.0;
        }
        (self.summaries_created as f64 / self.texts_extracted as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    papers_returned: usize,
    papers_without_pdf: AtomicUsize,
    texts_extracted: AtomicUsize,
    extraction_failures: AtomicUsize,
    summaries_created: AtomicUsize,
    summary_failures: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_papers: usize) -> Self {
        Self::with_color(total_papers, true)
    }

    pub fn with_color(total_papers: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_papers as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar, total_papers)
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_papers: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let main_bar = multi_progress.add(ProgressBar::new(total_papers as u64));
        let detail_bar = multi_progress.add(ProgressBar::new(0));

        Self::from_bars(main_bar, detail_bar, total_papers)
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar, total_papers: usize) -> Self {
        Self {
            main_bar,
            detail_bar,
            papers_returned: total_papers,
            papers_without_pdf: AtomicUsize::new(0),
            texts_extracted: AtomicUsize::new(0),
            extraction_failures: AtomicUsize::new(0),
            summaries_created: AtomicUsize::new(0),
            summary_failures: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_paper_done(&self) {
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_without_pdf(&self) {
        self.papers_without_pdf.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_text_extracted(&self) {
        self.texts_extracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_extraction_failed(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_summary_created(&self) {
        self.summaries_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_summary_failed(&self) {
        self.summary_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Processing complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            index_attempts: 0,
            papers_returned: self.papers_returned,
            papers_without_pdf: self.papers_without_pdf.load(Ordering::Relaxed),
            texts_extracted: self.texts_extracted.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            summaries_created: self.summaries_created.load(Ordering::Relaxed),
            summary_failures: self.summary_failures.load(Ordering::Relaxed),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let texts = self.texts_extracted.load(Ordering::Relaxed);
        let summaries = self.summaries_created.load(Ordering::Relaxed);
        let failed = self.extraction_failures.load(Ordering::Relaxed)
            + self.summary_failures.load(Ordering::Relaxed);

        let message = format!(
            "Texts: {} | Summaries: {} | Failed: {}",
            texts, summaries, failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} papers {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} papers {msg}"
    };

    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(if colored { "█▓▒░" } else { "=>-" });
    bar.set_style(style);
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
