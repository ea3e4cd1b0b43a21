// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod progress;
mod runner;

pub use progress::{Phase, ProgressObserver, SilentProgress, SpinnerProgress, TurnStats};
pub use runner::{PipelineRunner, SEARCH_APOLOGY, SUMMARY_APOLOGY, TurnOutcome, TurnStatus};
