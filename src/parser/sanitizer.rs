// file: src/parser/sanitizer.rs
// description: normalizes extracted PDF text into a storage-safe string
// reference: PDF text extraction artifacts (line breaks, wrap hyphenation)

use serde::{Deserialize, Serialize};

/// Character set the persisted text must be representable in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum StorageEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
}

impl StorageEncoding {
    pub const ASCII_REPLACEMENT: char = '?';

    fn encode(self, text: &str) -> String {
        match self {
            // A &str is valid UTF-8 by construction; undecodable bytes were
            // already turned into U+FFFD when the text was produced.
            Self::Utf8 => text.to_string(),
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c } else { Self::ASCII_REPLACEMENT })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer {
    encoding: StorageEncoding,
}

impl TextSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: StorageEncoding) -> Self {
        Self { encoding }
    }

    /// Never fails. The result has no `\n` or `\r` and no `"- "` sequence
    /// left over from line-wrap hyphenation.
    pub fn sanitize(&self, text: &str) -> String {
        let flattened = self.flatten_line_breaks(text);
        let joined = self.join_hyphenated_words(&flattened);
        self.encoding.encode(&joined)
    }

    fn flatten_line_breaks(&self, text: &str) -> String {
        text.replace(['\n', '\r'], " ")
    }

    fn join_hyphenated_words(&self, text: &str) -> String {
        text.replace("- ", "")
    }
}
