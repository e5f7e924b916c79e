// file: src/exporter/mod.rs
// description: run output persistence
// reference: internal module structure

pub mod json;

pub use json::{ExportManifest, JsonExporter};
