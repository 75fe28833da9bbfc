//! Timeout layer enforcing a uniform deadline.
//!
//! The completion call otherwise waits as long as the transport allows. This
//! layer applies the same deadline to every provider, so no backend gets an
//! unbounded wait.

use async_trait::async_trait;
use chartforge_core::error::ChartError;
use chartforge_core::layer::{Layer, LayeredProvider};
use chartforge_core::provider::Provider;
use chartforge_core::types::*;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Default deadline applied when none is configured.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Timeout layer configuration
#[derive(Debug, Clone)]
pub struct TimeoutLayer {
    deadline: Duration,
}

impl TimeoutLayer {
    /// Create a timeout layer with the given deadline
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// The configured deadline
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for TimeoutLayer {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE)
    }
}

impl<P: Provider> Layer<P> for TimeoutLayer {
    type LayeredProvider = TimeoutProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        TimeoutProvider {
            inner,
            deadline: self.deadline,
        }
    }
}

/// Provider wrapped with a deadline
#[derive(Debug)]
pub struct TimeoutProvider<P> {
    inner: P,
    deadline: Duration,
}

#[async_trait]
impl<P: Provider> LayeredProvider for TimeoutProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        match tokio::time::timeout(self.deadline, self.inner.chat_completion(req)).await {
            Ok(result) => result,
            Err(_) => Err(ChartError::timeout(format!(
                "completion did not finish within {:?}",
                self.deadline
            ))),
        }
    }
}

#[async_trait]
impl<P: Provider> Provider for TimeoutProvider<P> {
    fn info(&self) -> Arc<ProviderInfo> {
        LayeredProvider::layered_info(self)
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        LayeredProvider::layered_chat_completion(self, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Provider that never resolves, for deadline tests.
    #[derive(Debug)]
    struct StalledProvider;

    #[async_trait]
    impl Provider for StalledProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "stalled".to_string(),
                name: "Stalled".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            _req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, ChartError> {
            futures::future::pending().await
        }
    }

    #[derive(Debug)]
    struct InstantProvider;

    #[async_trait]
    impl Provider for InstantProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "instant".to_string(),
                name: "Instant".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, ChartError> {
            Ok(ChatCompletionResponse {
                id: "resp-1".to_string(),
                model: req.model,
                choices: vec![],
                usage: Usage::default(),
                created: None,
            })
        }
    }

    #[tokio::test]
    async fn test_deadline_elapsed_maps_to_timeout_error() {
        let provider = TimeoutLayer::new(Duration::from_millis(10)).layer(StalledProvider);
        let req = ChatCompletionRequest::new("gpt-4o", vec![Message::user("hi")]);

        let err = provider.chat_completion(req).await.unwrap_err();
        assert!(matches!(err, ChartError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_fast_completion_passes_through() {
        let provider = TimeoutLayer::default().layer(InstantProvider);
        let req = ChatCompletionRequest::new("gpt-4o", vec![Message::user("hi")]);

        let response = provider.chat_completion(req).await.unwrap();
        assert_eq!(response.id, "resp-1");
    }
}
