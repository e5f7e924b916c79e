// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use arxiv_digest::utils::logging::{format_error, format_success, format_warning, init_logger};
use arxiv_digest::{
    Config, DocumentFetcher, HuggingFaceClient, PaperIndexClient, PipelineController, RunState,
    Summarizer,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "arxiv_digest")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Fetch recent arXiv papers, extract their text and summarize them", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    colored::control::set_override(cli.color);

    let config = Config::load_or_default(&cli.config).context("Failed to load configuration")?;

    let _log_guard = init_logger(cli.color, cli.verbose, &config.logging.file);

    info!("arXiv digest");
    if cli.config.exists() {
        info!("Loaded configuration from: {}", cli.config.display());
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
    }

    let index = PaperIndexClient::new(&config.index, &config.fetcher)
        .context("Failed to create index client")?;
    let documents =
        DocumentFetcher::new(&config.fetcher).context("Failed to create document fetcher")?;
    let inference = HuggingFaceClient::new(&config.summarizer, &config.fetcher)
        .context("Failed to create inference client")?;
    let summarizer = Summarizer::new(inference, &config.summarizer);

    let controller = PipelineController::new(&config, index, documents, summarizer)
        .context("Failed to prepare output directory")?;

    let report = controller.run().await.context("Failed to persist run output")?;
    info!(
        "Run {} exported {} full texts and {} summaries at {}",
        report.run_id,
        report.manifest.full_papers,
        report.manifest.summaries,
        report.manifest.exported_at
    );

    match report.state {
        RunState::Succeeded => println!(
            "{}",
            format_success(&format!(
                "Saved {} full texts and {} summaries to {}",
                report.output.full_papers().len(),
                report.output.summaries().len(),
                report
                    .manifest
                    .files
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        ),
        RunState::Exhausted => println!(
            "{}",
            format_error("Sorry, fetching the papers did not work.")
        ),
        RunState::FatalParseFailure | RunState::Aborted => println!(
            "{}",
            format_warning(&format!(
                "Run ended early ({:?}); empty results were saved",
                report.state
            ))
        ),
        RunState::Querying
        | RunState::UnavailableRetry
        | RunState::EmptyRetry
        | RunState::NetworkRetry
        | RunState::ProcessingPapers => {}
    }

    if report.state.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
