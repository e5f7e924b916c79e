// file: src/utils/validation.rs
// description: configuration validation helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::{Component, Path};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Output file names are joined onto the output directory, so they must
    /// be a single plain path component.
    pub fn validate_file_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PipelineError::Validation(
                "File name cannot be empty".to_string(),
            ));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(PipelineError::Validation(format!(
                "File name must not contain directories: {}",
                name
            ))),
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((end, _)) => format!("{}...", &text[..end]),
        }
    }
}
