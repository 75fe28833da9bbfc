//! Provider trait and core abstractions.

use crate::error::ChartError;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Core provider trait for language-model completion services.
///
/// A provider wraps one HTTP completion backend. The engine only needs the
/// non-streaming chat completion call; everything above it (prompt assembly,
/// sanitization, execution) lives in the runtime.
#[async_trait]
pub trait Provider: Send + Sync + Debug + 'static {
    /// Get provider information
    fn info(&self) -> Arc<ProviderInfo>;

    /// Chat completion (non-streaming)
    ///
    /// One synchronous completion call. Failures surface immediately to the
    /// caller; there is no retry or backoff at this level.
    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError>;
}
