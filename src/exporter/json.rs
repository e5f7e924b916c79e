// file: src/exporter/json.rs
// description: json persistence of full paper texts and summaries
// reference: https://docs.rs/serde_json/latest/serde_json/ser/struct.PrettyFormatter.html

use crate::config::OutputConfig;
use crate::error::{PipelineError, Result};
use crate::models::RunOutput;
use chrono::Utc;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    full_papers_path: PathBuf,
    summaries_path: PathBuf,
}

#[derive(Debug)]
pub struct ExportManifest {
    pub exported_at: String,
    pub full_papers: usize,
    pub summaries: usize,
    pub files: Vec<PathBuf>,
}

impl JsonExporter {
    pub fn new(config: &OutputConfig) -> Result<Self> {
        fs::create_dir_all(&config.directory).map_err(|source| PipelineError::FileOperation {
            path: config.directory.clone(),
            source,
        })?;

        Ok(Self {
            full_papers_path: config.full_papers_path(),
            summaries_path: config.summaries_path(),
        })
    }

    pub fn full_papers_path(&self) -> &Path {
        &self.full_papers_path
    }

    pub fn summaries_path(&self) -> &Path {
        &self.summaries_path
    }

    /// Writes both files, even when the run produced nothing.
    pub fn export(&self, output: &RunOutput) -> Result<ExportManifest> {
        let full_papers = escape_non_ascii(&to_pretty_json(output.full_papers())?);
        write_file(&self.full_papers_path, &full_papers)?;
        info!(
            "Formatted data written into {}",
            self.full_papers_path.display()
        );

        let summaries = to_pretty_json(output.summaries())?;
        write_file(&self.summaries_path, &summaries)?;
        info!("Summaries written into {}", self.summaries_path.display());

        Ok(ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            full_papers: output.full_papers().len(),
            summaries: output.summaries().len(),
            files: vec![self.full_papers_path.clone(), self.summaries_path.clone()],
        })
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| PipelineError::Serialization(e.to_string()))?;

    String::from_utf8(buf).map_err(|e| PipelineError::Serialization(e.to_string()))
}

/// Rewrites every non-ASCII character as a `\uXXXX` escape (surrogate pairs
/// above the BMP). Only valid on serialized JSON, where such characters can
/// only occur inside string literals.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for c in json.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(escaped, "\\u{:04x}", unit);
            }
        }
    }

    escaped
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| PipelineError::FileOperation {
        path: path.to_path_buf(),
        source,
    })
}
