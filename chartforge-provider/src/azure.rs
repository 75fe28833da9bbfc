//! Azure OpenAI provider implementation.
//!
//! Azure speaks the same chat-completions protocol but routes through a
//! per-resource endpoint, an API version, and a deployment name instead of a
//! model id. All four values come from the Azure resource configuration.

use async_openai::config::AzureConfig;
use async_openai::Client;
use async_trait::async_trait;
use chartforge_core::error::ChartError;
use chartforge_core::provider::Provider;
use chartforge_core::types::*;
use std::sync::Arc;

use crate::openai::{map_api_error, OpenAiProvider};

/// Azure OpenAI provider
#[derive(Clone)]
pub struct AzureProvider {
    client: Client<AzureConfig>,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for AzureProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureProvider")
            .field("info", &self.info)
            .finish()
    }
}

impl AzureProvider {
    /// Create a builder for Azure configuration
    pub fn builder() -> AzureBuilder {
        AzureBuilder::default()
    }
}

#[async_trait]
impl Provider for AzureProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        let azure_req = OpenAiProvider::build_request(&req)?;

        let response = self
            .client
            .chat()
            .create(azure_req)
            .await
            .map_err(map_api_error)?;

        Ok(OpenAiProvider::convert_response(response))
    }
}

/// Builder for the Azure OpenAI provider
#[derive(Default)]
pub struct AzureBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
    deployment: Option<String>,
}

impl AzureBuilder {
    /// Set the Azure resource endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API version
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the deployment name
    pub fn deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<AzureProvider, ChartError> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| ChartError::configuration("Azure endpoint is required"))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ChartError::configuration("API key is required"))?;
        let api_version = self
            .api_version
            .ok_or_else(|| ChartError::configuration("Azure API version is required"))?;
        let deployment = self
            .deployment
            .ok_or_else(|| ChartError::configuration("Azure deployment name is required"))?;

        let config = AzureConfig::new()
            .with_api_base(endpoint)
            .with_api_key(api_key)
            .with_api_version(api_version)
            .with_deployment_id(deployment);

        let client = Client::with_config(config);

        Ok(AzureProvider {
            client,
            info: Arc::new(ProviderInfo {
                id: "azure".to_string(),
                name: "Azure OpenAI".to_string(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_all_azure_fields() {
        let err = AzureProvider::builder()
            .api_key("key")
            .build()
            .unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));

        let provider = AzureProvider::builder()
            .endpoint("https://example.openai.azure.com")
            .api_key("key")
            .api_version("2024-02-01")
            .deployment("gpt-4o")
            .build()
            .unwrap();
        assert_eq!(provider.info().id, "azure");
    }
}
