//! OpenAI provider implementation using the async-openai crate.
//!
//! This provider also serves OpenAI-compatible backends (Groq, and any other
//! service speaking the chat-completions protocol) through a configurable
//! base URL and provider id.

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use chartforge_core::error::ChartError;
use chartforge_core::provider::Provider;
use chartforge_core::types::*;
use std::sync::Arc;

/// OpenAI provider using async-openai
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("info", &self.info)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with default configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);

        Self {
            client,
            info: Arc::new(ProviderInfo {
                id: "openai".to_string(),
                name: "OpenAI".to_string(),
            }),
        }
    }

    /// Create a builder for more configuration options
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::default()
    }

    /// Convert our Message type to OpenAI's ChatCompletionRequestMessage
    fn convert_message(msg: &Message) -> Result<ChatCompletionRequestMessage, ChartError> {
        match msg.role {
            Role::System => {
                let msg = ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| {
                        ChartError::provider(format!("Failed to build system message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::System(msg))
            }
            Role::User => {
                let msg = ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| {
                        ChartError::provider(format!("Failed to build user message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::User(msg))
            }
            Role::Assistant => {
                let msg = ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| {
                        ChartError::provider(format!("Failed to build assistant message: {}", e))
                    })?;
                Ok(ChatCompletionRequestMessage::Assistant(msg))
            }
        }
    }

    /// Build CreateChatCompletionRequest from our ChatCompletionRequest
    pub(crate) fn build_request(
        req: &ChatCompletionRequest,
    ) -> Result<CreateChatCompletionRequest, ChartError> {
        let messages: Result<Vec<_>, _> = req.messages.iter().map(Self::convert_message).collect();

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&req.model).messages(messages?);

        if let Some(max_tokens) = req.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = req.temperature {
            builder.temperature(temperature);
        }
        if let Some(top_p) = req.top_p {
            builder.top_p(top_p);
        }

        builder
            .build()
            .map_err(|e| ChartError::provider(format!("Failed to build request: {}", e)))
    }

    /// Convert OpenAI response to our ChatCompletionResponse
    pub(crate) fn convert_response(
        response: async_openai::types::CreateChatCompletionResponse,
    ) -> ChatCompletionResponse {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                let message = Message {
                    role: match choice.message.role {
                        async_openai::types::Role::System => Role::System,
                        async_openai::types::Role::User => Role::User,
                        _ => Role::Assistant,
                    },
                    content: choice.message.content.unwrap_or_default(),
                };

                let finish_reason = choice
                    .finish_reason
                    .map_or(FinishReason::Stop, |r| match r {
                        async_openai::types::FinishReason::Stop => FinishReason::Stop,
                        async_openai::types::FinishReason::Length => FinishReason::Length,
                        async_openai::types::FinishReason::ContentFilter => {
                            FinishReason::ContentFilter
                        }
                        _ => FinishReason::Other("unknown".to_string()),
                    });

                Choice {
                    index: choice.index,
                    message,
                    finish_reason,
                }
            })
            .collect();

        let usage = response.usage.map_or(Usage::default(), |u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
            created: Some(response.created as u64),
        }
    }
}

/// Map an async-openai error onto the structured error taxonomy.
pub(crate) fn map_api_error(err: OpenAIError) -> ChartError {
    match err {
        OpenAIError::ApiError(api) => {
            let message = api.message.clone();
            match api.r#type.as_deref() {
                Some("insufficient_quota") | Some("rate_limit_exceeded") | Some("tokens") => {
                    ChartError::rate_limit(message)
                }
                Some("invalid_api_key") | Some("authentication_error") => {
                    ChartError::authentication(message)
                }
                _ => ChartError::provider(message),
            }
        }
        other => ChartError::provider(format!("OpenAI API error: {}", other)),
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        let openai_req = Self::build_request(&req)?;

        let response = self
            .client
            .chat()
            .create(openai_req)
            .await
            .map_err(map_api_error)?;

        Ok(Self::convert_response(response))
    }
}

/// Builder for OpenAI provider with custom configuration
#[derive(Default)]
pub struct OpenAiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    org_id: Option<String>,
}

impl OpenAiBuilder {
    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set API base URL (for OpenAI-compatible APIs like Groq)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set organization ID
    pub fn organization(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<OpenAiProvider, ChartError> {
        self.build_with_id("openai", "OpenAI")
    }

    /// Build a provider with a custom provider ID and name
    ///
    /// This is useful for OpenAI-compatible APIs like Groq that use the same
    /// protocol but a different endpoint.
    pub fn build_with_id(
        self,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Result<OpenAiProvider, ChartError> {
        let api_key = self
            .api_key
            .ok_or_else(|| ChartError::configuration("API key is required"))?;

        let mut config = OpenAIConfig::new().with_api_key(api_key);

        if let Some(api_base) = self.api_base {
            config = config.with_api_base(api_base);
        }

        if let Some(org_id) = self.org_id {
            config = config.with_org_id(org_id);
        }

        let client = Client::with_config(config);

        Ok(OpenAiProvider {
            client,
            info: Arc::new(ProviderInfo {
                id: provider_id.into(),
                name: provider_name.into(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_carries_uniform_params() {
        let req = ChatCompletionRequest::new(
            "gpt-4o",
            vec![Message::system("sys"), Message::user("usr")],
        )
        .with_params(&GenerationParams::default());

        let built = OpenAiProvider::build_request(&req).unwrap();
        assert_eq!(built.model, "gpt-4o");
        assert_eq!(built.messages.len(), 2);
        assert_eq!(built.max_tokens, Some(1024));
        assert_eq!(built.temperature, Some(0.2));
        assert_eq!(built.top_p, Some(0.1));
    }

    #[test]
    fn test_builder_requires_api_key() {
        let err = OpenAiProvider::builder().build().unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }
}
