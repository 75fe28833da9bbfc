//! Error types for chart generation operations.

/// The main error type for chart generation.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Provider-specific errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limit errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Invalid request errors (e.g. an empty prompt)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout errors
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// No code remained after sanitization filtered the completion
    #[error("No valid code remaining after filtering")]
    EmptyCode,

    /// The generated code failed while executing
    #[error("Execution error: {0}")]
    Execution(String),

    /// The executed code did not bind a usable figure
    #[error("No figure produced: the fig object is missing or None")]
    MissingArtifact,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors
    #[error("Error: {0}")]
    Other(String),
}

impl ChartError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limit(msg: impl Into<String>) -> Self {
        Self::RateLimit(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Check if this error originated on the provider side of the request
    pub fn is_provider_side(&self) -> bool {
        matches!(
            self,
            ChartError::Provider(_)
                | ChartError::Network(_)
                | ChartError::Authentication(_)
                | ChartError::RateLimit(_)
                | ChartError::Timeout(_)
        )
    }
}

impl From<String> for ChartError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ChartError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
