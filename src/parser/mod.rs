// file: src/parser/mod.rs
// description: feed parsing and text sanitization module exports
// reference: internal module structure

pub mod feed;
pub mod sanitizer;

pub use feed::{ParsedFeed, parse_feed};
pub use sanitizer::{StorageEncoding, TextSanitizer};
