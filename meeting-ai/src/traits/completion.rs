//! Language-model completion provider trait.

use crate::types::completion::{Completion, CompletionRequest};
use crate::Error;
use async_trait::async_trait;

/// Abstraction for a single-turn language-model completion service.
///
/// Implementations send a system instruction plus one user message and return the
/// raw content blocks produced by the model. Anthropic Messages, OpenAI chat and
/// local models all fit behind this send-and-receive-text seam, and tests swap in
/// a fake returning canned text.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue exactly one completion request.
    ///
    /// Implementations must not retry; a transport or provider failure is returned as-is.
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<Completion, Error>;

    /// Return unique identifier for this provider (e.g., "anthropic").
    fn provider_id(&self) -> &str;
}
