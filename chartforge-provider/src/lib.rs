//! # chartforge providers
//!
//! Provider implementations for the three supported completion backends:
//! OpenAI, Azure OpenAI, and Groq (through its OpenAI-compatible endpoint).

pub mod azure;
pub mod openai;

// Re-exports
pub use azure::{AzureBuilder, AzureProvider};
pub use openai::{OpenAiBuilder, OpenAiProvider};

use async_trait::async_trait;
use chartforge_core::error::ChartError;
use chartforge_core::provider::Provider;
use chartforge_core::types::{ChatCompletionRequest, ChatCompletionResponse, ProviderInfo};
use std::str::FromStr;
use std::sync::Arc;

/// Create a Groq provider (OpenAI-compatible)
///
/// Groq uses the OpenAI API protocol but with a different endpoint. This is
/// a convenience function that creates an OpenAI provider configured for
/// Groq's API endpoint.
///
/// # Example
///
/// ```ignore
/// use chartforge_provider::groq;
///
/// let provider = groq("your-api-key")?;
/// ```
pub fn groq(api_key: impl Into<String>) -> Result<OpenAiProvider, ChartError> {
    OpenAiProvider::builder()
        .api_key(api_key)
        .api_base("https://api.groq.com/openai/v1")
        .build_with_id("groq", "Groq")
}

/// The closed enumeration of supported backends, fixed at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Azure,
    Groq,
}

impl FromStr for ProviderKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "azure" => Ok(Self::Azure),
            "groq" => Ok(Self::Groq),
            other => Err(ChartError::configuration(format!(
                "invalid provider {:?}, choose \"openai\", \"azure\", or \"groq\"",
                other
            ))),
        }
    }
}

impl ProviderKind {
    /// Read the provider selection from `CHARTFORGE_PROVIDER`, defaulting to
    /// OpenAI when unset.
    pub fn from_env() -> Result<Self, ChartError> {
        match std::env::var("CHARTFORGE_PROVIDER") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::OpenAi),
        }
    }

    /// Build this backend from its environment variables.
    ///
    /// - OpenAI: `OPENAI_API_KEY`
    /// - Groq: `GROQ_API_KEY`
    /// - Azure: `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_KEY`,
    ///   `OPENAI_API_VERSION`, `DEPLOYMENT_NAME`
    pub fn build_from_env(self) -> Result<AnyProvider, ChartError> {
        fn env(name: &str) -> Result<String, ChartError> {
            std::env::var(name)
                .map_err(|_| ChartError::configuration(format!("{} is not set", name)))
        }

        match self {
            Self::OpenAi => Ok(AnyProvider::OpenAi(OpenAiProvider::new(env(
                "OPENAI_API_KEY",
            )?))),
            Self::Groq => Ok(AnyProvider::OpenAi(groq(env("GROQ_API_KEY")?)?)),
            Self::Azure => {
                let provider = AzureProvider::builder()
                    .endpoint(env("AZURE_OPENAI_ENDPOINT")?)
                    .api_key(env("AZURE_OPENAI_KEY")?)
                    .api_version(env("OPENAI_API_VERSION")?)
                    .deployment(env("DEPLOYMENT_NAME")?)
                    .build()?;
                Ok(AnyProvider::Azure(provider))
            }
        }
    }
}

/// A provider built from the closed enumeration.
///
/// Groq shares the OpenAI variant: it differs only in endpoint and id.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    OpenAi(OpenAiProvider),
    Azure(AzureProvider),
}

#[async_trait]
impl Provider for AnyProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        match self {
            Self::OpenAi(p) => p.info(),
            Self::Azure(p) => p.info(),
        }
    }

    async fn chat_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ChartError> {
        match self {
            Self::OpenAi(p) => p.chat_completion(req).await,
            Self::Azure(p) => p.chat_completion(req).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("Azure".parse::<ProviderKind>().unwrap(), ProviderKind::Azure);
        assert_eq!("GROQ".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
        assert!("gemini".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_groq_provider_identity() {
        let provider = groq("test-key").unwrap();
        let info = provider.info();
        assert_eq!(info.id, "groq");
        assert_eq!(info.name, "Groq");
    }
}
