//! Meeting AI abstraction layer for LLM-powered transcript analysis.
//!
//! This crate provides the provider-agnostic half of the analysis workflow:
//! - A completion capability trait that any language-model provider implements
//! - Tolerant extraction of a JSON object from free-form model output
//! - Coercion of that object into the stable [`AnalysisResult`] contract
//!
//! Nothing here performs network I/O, so everything can be exercised with a
//! fake completion client returning canned text.

pub mod error;
pub mod extract;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use extract::extract_json_object;
pub use traits::completion::CompletionClient;
pub use types::analysis::{AnalysisResult, Priority, Task};
pub use types::completion::{Completion, CompletionRequest, ContentBlock};
