//! Business logic for meeting transcript analysis.
//!
//! `web` talks to this crate only: it re-exports the result types from
//! `meeting-ai` so consumers do not need to depend on that crate directly.
pub use meeting_ai::{AnalysisResult, CompletionClient, Priority, Task};

pub mod analysis;
pub mod error;

pub mod gateway;
