//! Layer trait and abstractions.
//!
//! Inspired by OpenDAL's architecture, layers provide a composable way to wrap
//! providers with cross-cutting concerns like logging and timeouts.

use crate::error::ChartError;
use crate::provider::Provider;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Layer trait for wrapping providers.
///
/// A layer wraps an inner provider and returns a new provider with enhanced
/// capabilities, composing middleware-like functionality with static dispatch.
pub trait Layer<P: Provider> {
    /// The type of the layered provider
    type LayeredProvider: Provider;

    /// Wrap the inner provider with this layer
    fn layer(&self, inner: P) -> Self::LayeredProvider;
}

/// Helper trait for layered providers.
///
/// Provides default forwarding implementations for provider methods, so
/// implementers only override the methods they want to intercept.
#[async_trait]
pub trait LayeredProvider: Sized + Provider {
    /// The inner provider type
    type Inner: Provider;

    /// Get a reference to the inner provider
    fn inner(&self) -> &Self::Inner;

    /// Default implementation for info - forwards to inner
    fn layered_info(&self) -> Arc<ProviderInfo> {
        self.inner().info()
    }

    /// Default implementation for chat_completion - forwards to inner
    async fn layered_chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        self.inner().chat_completion(req).await
    }
}
