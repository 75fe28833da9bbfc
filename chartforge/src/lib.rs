//! # chartforge
//!
//! Natural-language chart generation for Rust.
//!
//! chartforge turns a free-text chart request into a Plotly figure by
//! delegating code generation to one of three interchangeable AI providers
//! (OpenAI, Azure OpenAI, Groq), sanitizing the returned completion, and
//! executing the remaining code in an isolated Python subprocess.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! chartforge = { version = "0.1", features = ["providers", "layers", "exec"] }
//! ```
//!
//! ```ignore
//! use chartforge::prelude::*;
//! use chartforge::provider::OpenAiProvider;
//! use chartforge::layer::{LoggingLayer, TimeoutLayer};
//! use chartforge::exec::PythonExecutor;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = OpenAiProvider::new("your-api-key");
//!
//! let engine = ChartEngine::builder(provider)
//!     .layer(LoggingLayer::new())
//!     .layer(TimeoutLayer::default())
//!     .executor(Arc::new(PythonExecutor::new()))
//!     .finish()?;
//!
//! let chart = engine
//!     .generate("Line chart of average patient heart rate over 7 days", None)
//!     .await?;
//! println!("{}", chart.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes `providers`, `layers`, and `exec`
//! - `providers`: OpenAI, Azure OpenAI, and Groq provider support
//! - `layers`: Built-in layers (logging, timeout)
//! - `exec`: Python subprocess executor
//! - `full`: All features enabled
//!
//! ## A note on trust
//!
//! The executed code is untrusted model output. The bundled executor
//! isolates it in a subprocess with a deadline; it does not defend against
//! code that misuses the seeded libraries themselves.

// Re-export core types and traits
pub use chartforge_core::*;

// Re-export providers under `provider` module
#[cfg(feature = "chartforge-provider")]
pub mod provider {
    //! AI provider implementations.
    pub use chartforge_provider::*;
}

// Re-export layers under `layer` module
#[cfg(feature = "chartforge-layer")]
pub mod layer {
    //! Built-in middleware layers.
    pub use chartforge_layer::*;
}

// Re-export executors under `exec` module
#[cfg(feature = "chartforge-exec")]
pub mod exec {
    //! Code execution backends.
    pub use chartforge_exec::*;
}

// Convenience re-exports at root level for common types
pub use chartforge_core::{
    artifact::ChartArtifact,
    classify::FailureCategory,
    error::ChartError,
    exec::CodeExecutor,
    layer::{Layer, LayeredProvider},
    provider::Provider,
    runtime::{ChartEngine, ChartOutcome},
    types::{
        ChatCompletionRequest, ChatCompletionResponse, Choice, FinishReason, GenerationParams,
        Message, ProviderInfo, RequestContext, Role, Usage,
    },
    Result,
};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use chartforge::prelude::*;
    //! ```

    pub use crate::{
        ChartArtifact, ChartEngine, ChartError, ChartOutcome, CodeExecutor, FailureCategory,
        GenerationParams, Layer, Message, Provider, Result, Role,
    };

    #[cfg(feature = "chartforge-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "chartforge-layer")]
    pub use crate::layer::*;

    #[cfg(feature = "chartforge-exec")]
    pub use crate::exec::*;
}
