//! ChartEngine implementation.
//!
//! The engine orchestrates one chart request end to end: prompt validation,
//! dispatch to the configured provider, sanitization of the completion, and
//! execution of the remaining code into a chart artifact.

use crate::artifact::ChartArtifact;
use crate::error::ChartError;
use crate::exec::CodeExecutor;
use crate::layer::Layer;
use crate::prompt;
use crate::provider::Provider;
use crate::runtime::outcome::ChartOutcome;
use crate::sanitize;
use crate::types::*;
use std::sync::Arc;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn Provider>;

/// Type-erased executor
type BoxedExecutor = Arc<dyn CodeExecutor>;

/// Model used when the caller gives no hint and no default is configured.
const FALLBACK_MODEL: &str = "gpt-4o";

/// Builder for composing a chart engine from a provider, layers, and an
/// executor.
///
/// Layers wrap the provider with static dispatch during building; a single
/// type erasure happens at `finish()`.
///
/// # Example
///
/// ```ignore
/// let engine = ChartEngine::builder(provider)
///     .layer(LoggingLayer::new())
///     .layer(TimeoutLayer::new(Duration::from_secs(30)))
///     .executor(Arc::new(PythonExecutor::new()))
///     .finish()?;
/// ```
pub struct ChartEngineBuilder<P> {
    provider: P,
    executor: Option<BoxedExecutor>,
    params: GenerationParams,
    default_model: String,
}

impl<P: Provider> ChartEngineBuilder<P> {
    /// Create a new builder with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            executor: None,
            params: GenerationParams::default(),
            default_model: FALLBACK_MODEL.to_string(),
        }
    }

    /// Add a layer to wrap the provider
    ///
    /// This uses static dispatch - each call to `layer()` creates a new
    /// concrete type by wrapping the previous provider.
    pub fn layer<L>(self, layer: L) -> ChartEngineBuilder<L::LayeredProvider>
    where
        L: Layer<P>,
    {
        ChartEngineBuilder {
            provider: layer.layer(self.provider),
            executor: self.executor,
            params: self.params,
            default_model: self.default_model,
        }
    }

    /// Set the executor that runs sanitized code
    pub fn executor(mut self, executor: BoxedExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set the uniform generation parameters
    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Set the model used when no per-request hint is given
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Finish building and create a ChartEngine
    pub fn finish(self) -> Result<ChartEngine, ChartError> {
        let executor = self
            .executor
            .ok_or_else(|| ChartError::configuration("a code executor is required"))?;

        Ok(ChartEngine {
            provider: Arc::new(self.provider),
            executor,
            params: self.params,
            default_model: self.default_model,
        })
    }
}

/// Chart generation engine.
///
/// This is the main entry point for turning a natural-language request into
/// a chart artifact. The engine holds only read-only configuration; each
/// `generate` call is an independent request with no state carried across
/// invocations.
pub struct ChartEngine {
    provider: BoxedProvider,
    executor: BoxedExecutor,
    params: GenerationParams,
    default_model: String,
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field("provider", &self.provider.info())
            .field("params", &self.params)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl ChartEngine {
    /// Create a new builder
    pub fn builder<P: Provider>(provider: P) -> ChartEngineBuilder<P> {
        ChartEngineBuilder::new(provider)
    }

    /// Get provider information
    pub fn info(&self) -> Arc<ProviderInfo> {
        self.provider.info()
    }

    /// Generate a chart from a natural-language request.
    ///
    /// `model_hint` overrides the configured default model for this request.
    /// The prompt must be non-empty after trimming; an empty prompt is
    /// rejected before any provider is contacted.
    pub async fn generate(
        &self,
        prompt: &str,
        model_hint: Option<&str>,
    ) -> Result<ChartArtifact, ChartError> {
        let prompt = prompt::validate_prompt(prompt)?;

        let model = model_hint.unwrap_or(&self.default_model);
        let ctx = RequestContext::new(self.provider.info().id.clone(), model);
        tracing::debug!(
            request_id = %ctx.request_id,
            provider = %ctx.provider_id,
            model = %ctx.model,
            "chart request"
        );

        let raw = self.dispatch(prompt, &ctx).await?;
        self.build(&raw, &ctx).await
    }

    /// Generate, folding any failure into render-ready outcome state.
    pub async fn generate_outcome(&self, prompt: &str, model_hint: Option<&str>) -> ChartOutcome {
        match self.generate(prompt, model_hint).await {
            Ok(artifact) => ChartOutcome::success(artifact),
            Err(err) => {
                tracing::error!(error = %err, "chart request failed");
                ChartOutcome::failure(&err)
            }
        }
    }

    /// Request dispatcher stage: one completion call, no retry.
    async fn dispatch(&self, prompt: &str, ctx: &RequestContext) -> Result<String, ChartError> {
        let req = ChatCompletionRequest::new(ctx.model.clone(), prompt::build_messages(prompt))
            .with_params(&self.params);

        let response = self.provider.chat_completion(req).await?;
        let text = response
            .first_text()
            .ok_or_else(|| ChartError::provider("no choices in completion response"))?;

        Ok(text.trim().to_string())
    }

    /// Artifact pipeline stage: sanitize, execute, extract.
    async fn build(&self, raw: &str, ctx: &RequestContext) -> Result<ChartArtifact, ChartError> {
        let code = sanitize::clean(raw);
        if code.is_empty() {
            return Err(ChartError::EmptyCode);
        }

        tracing::debug!(
            request_id = %ctx.request_id,
            executor = self.executor.name(),
            lines = code.lines().count(),
            "executing sanitized code"
        );

        self.executor.run(&code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FailureCategory;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StaticProvider {
        reply: String,
        calls: AtomicUsize,
        last_model: Mutex<Option<String>>,
    }

    impl StaticProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Provider for StaticProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "static".to_string(),
                name: "Static".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, ChartError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_model.lock().unwrap() = Some(req.model.clone());
            Ok(ChatCompletionResponse {
                id: "resp-1".to_string(),
                model: req.model,
                choices: vec![Choice {
                    index: 0,
                    message: Message::assistant(self.reply.clone()),
                    finish_reason: FinishReason::Stop,
                }],
                usage: Usage::default(),
                created: None,
            })
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        fn info(&self) -> Arc<ProviderInfo> {
            Arc::new(ProviderInfo {
                id: "failing".to_string(),
                name: "Failing".to_string(),
            })
        }

        async fn chat_completion(
            &self,
            _req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, ChartError> {
            Err(ChartError::provider("connection refused"))
        }
    }

    /// Records the code it receives and replies with a fixed figure.
    #[derive(Debug, Default)]
    struct RecordingExecutor {
        calls: AtomicUsize,
        last_code: Mutex<Option<String>>,
    }

    #[async_trait]
    impl CodeExecutor for RecordingExecutor {
        fn name(&self) -> &str {
            "recording"
        }

        async fn run(&self, code: &str) -> Result<ChartArtifact, ChartError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_code.lock().unwrap() = Some(code.to_string());
            ChartArtifact::new(json!({
                "data": [],
                "layout": {"title": {"text": "No data found"}}
            }))
        }
    }

    #[derive(Debug)]
    struct MissingFigExecutor;

    #[async_trait]
    impl CodeExecutor for MissingFigExecutor {
        fn name(&self) -> &str {
            "missing-fig"
        }

        async fn run(&self, _code: &str) -> Result<ChartArtifact, ChartError> {
            Err(ChartError::MissingArtifact)
        }
    }

    fn engine_with(
        provider: impl Provider,
        executor: Arc<dyn CodeExecutor>,
    ) -> ChartEngine {
        ChartEngine::builder(provider)
            .executor(executor)
            .finish()
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_before_provider_call() {
        let provider = Arc::new(StaticProvider::replying("fig = 1"));
        let executor = Arc::new(RecordingExecutor::default());
        let engine = ChartEngine::builder(CountingHandle(provider.clone()))
            .executor(executor.clone())
            .finish()
            .unwrap();

        for prompt in ["", "   ", "\n\t "] {
            let err = engine.generate(prompt, None).await.unwrap_err();
            assert!(matches!(err, ChartError::InvalidRequest(_)));
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    /// Wraps an Arc'd provider so call counts stay observable from the test.
    #[derive(Debug)]
    struct CountingHandle(Arc<StaticProvider>);

    #[async_trait]
    impl Provider for CountingHandle {
        fn info(&self) -> Arc<ProviderInfo> {
            self.0.info()
        }

        async fn chat_completion(
            &self,
            req: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, ChartError> {
            self.0.chat_completion(req).await
        }
    }

    #[tokio::test]
    async fn test_preamble_dropped_before_execution() {
        let reply = "Here is the code:\nimport plotly.express as px\nfig = px.bar(x=[1], y=[2])\n";
        let executor = Arc::new(RecordingExecutor::default());
        let engine = engine_with(StaticProvider::replying(reply), executor.clone());

        let artifact = engine.generate("bar chart", None).await.unwrap();
        assert_eq!(artifact.title(), Some("No data found"));

        let code = executor.last_code.lock().unwrap().clone().unwrap();
        assert_eq!(
            code,
            "import plotly.express as px\nfig = px.bar(x=[1], y=[2])"
        );
    }

    #[tokio::test]
    async fn test_prose_only_reply_is_empty_code_and_skips_execution() {
        let reply = "Here is the code you asked for.\nBelow is what it does.";
        let executor = Arc::new(RecordingExecutor::default());
        let engine = engine_with(StaticProvider::replying(reply), executor.clone());

        let err = engine.generate("bar chart", None).await.unwrap_err();
        assert!(matches!(err, ChartError::EmptyCode));
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_artifact_surfaces_from_executor() {
        let engine = engine_with(
            StaticProvider::replying("```python\nfig = None\n```"),
            Arc::new(MissingFigExecutor),
        );

        let err = engine.generate("anything", None).await.unwrap_err();
        assert!(matches!(err, ChartError::MissingArtifact));
        assert_eq!(FailureCategory::of(&err), FailureCategory::MissingChart);
    }

    #[tokio::test]
    async fn test_provider_failure_classifies_as_api_and_clears_chart() {
        let engine = engine_with(FailingProvider, Arc::new(RecordingExecutor::default()));

        let outcome = engine.generate_outcome("bar chart", None).await;
        assert!(outcome.figure.is_none());
        assert!(outcome.show_retry);
        assert!(outcome
            .error
            .unwrap()
            .contains("API key or network connection"));
    }

    #[tokio::test]
    async fn test_model_hint_overrides_default() {
        let provider = Arc::new(StaticProvider::replying("fig = 1"));
        let engine = ChartEngine::builder(CountingHandle(provider.clone()))
            .executor(Arc::new(RecordingExecutor::default()))
            .default_model("gpt-4o-mini")
            .finish()
            .unwrap();

        engine.generate("bar chart", Some("o1-mini")).await.unwrap();
        assert_eq!(
            provider.last_model.lock().unwrap().as_deref(),
            Some("o1-mini")
        );

        engine.generate("bar chart", None).await.unwrap();
        assert_eq!(
            provider.last_model.lock().unwrap().as_deref(),
            Some("gpt-4o-mini")
        );
    }

    #[test]
    fn test_builder_requires_executor() {
        let err = ChartEngine::builder(FailingProvider).finish().unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }
}
