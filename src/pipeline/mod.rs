// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: run state machine and progress reporting

mod controller;
#[cfg(test)]
pub(crate) mod mock;
mod progress;

pub use controller::{PipelineController, RunReport, RunState};
pub use progress::{PipelineStats, ProgressTracker};
