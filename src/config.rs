// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::models::QueryParameters;
use crate::parser::StorageEncoding;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub index: IndexConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub summarizer: SummarizerConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    pub base_url: String,
    pub search_query: String,
    pub sort_by: String,
    pub sort_order: String,
    pub max_results: u32,
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub network_retry_delay_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FetcherConfig {
    /// Unset keeps the HTTP client's own default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummarizerConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    pub min_length: u32,
    pub max_length: u32,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub full_papers_file: String,
    pub summaries_file: String,
    #[serde(default)]
    pub storage_encoding: StorageEncoding,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("arxiv_summary.log"),
        }
    }
}

impl IndexConfig {
    pub fn query_parameters(&self) -> QueryParameters {
        QueryParameters::new(
            self.search_query.clone(),
            self.sort_by.clone(),
            self.sort_order.clone(),
            self.max_results,
        )
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn network_retry_delay(&self) -> Duration {
        Duration::from_secs(self.network_retry_delay_secs)
    }
}

impl FetcherConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl SummarizerConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl OutputConfig {
    pub fn full_papers_path(&self) -> PathBuf {
        self.directory.join(&self.full_papers_file)
    }

    pub fn summaries_path(&self) -> PathBuf {
        self.directory.join(&self.summaries_file)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ARXIV_DIGEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if config.summarizer.api_token.is_none() {
            config.summarizer.api_token = std::env::var("HF_API_TOKEN").ok();
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise the built-in defaults. `.env` is
    /// read first on both paths so `HF_API_TOKEN` can come from it.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        dotenv().ok();

        if path.exists() {
            return Self::load(Some(path));
        }

        let config = Self::default_config();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            index: IndexConfig {
                base_url: "http://export.arxiv.org/api/query".to_string(),
                search_query: "cat:cs.AI".to_string(),
                sort_by: "submittedDate".to_string(),
                sort_order: "descending".to_string(),
                max_results: 2,
                max_attempts: 5,
                retry_delay_secs: 5,
                network_retry_delay_secs: 30,
            },
            fetcher: FetcherConfig::default(),
            summarizer: SummarizerConfig {
                endpoint: "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
                    .to_string(),
                api_token: std::env::var("HF_API_TOKEN").ok(),
                min_length: 500,
                max_length: 600,
                max_retries: 3,
                retry_delay_secs: 5,
            },
            output: OutputConfig {
                directory: PathBuf::from("."),
                full_papers_file: "full_papers_data.json".to_string(),
                summaries_file: "summaries_data.json".to_string(),
                storage_encoding: StorageEncoding::default(),
            },
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.index.base_url)?;
        Validator::validate_url(&self.summarizer.endpoint)?;

        if self.index.max_attempts == 0 {
            return Err(PipelineError::Config(
                "index.max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.index.max_results == 0 {
            return Err(PipelineError::Config(
                "index.max_results must be greater than 0".to_string(),
            ));
        }

        if self.summarizer.max_retries == 0 {
            return Err(PipelineError::Config(
                "summarizer.max_retries must be greater than 0".to_string(),
            ));
        }

        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(PipelineError::Config(format!(
                "summarizer.min_length ({}) exceeds max_length ({})",
                self.summarizer.min_length, self.summarizer.max_length
            )));
        }

        Validator::validate_file_name(&self.output.full_papers_file)?;
        Validator::validate_file_name(&self.output.summaries_file)?;

        Ok(())
    }
}
