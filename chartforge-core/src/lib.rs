//! # chartforge-core
//!
//! Core abstractions and runtime for chartforge.
//!
//! This crate provides the foundational traits and types for turning a
//! natural-language chart request into a rendered chart artifact: the
//! provider boundary (language-model chat completion), the sanitization
//! pipeline that turns untrusted completions into executable code, the
//! executor boundary that runs that code in an isolated plotting runtime,
//! and the failure classification shown to users.

pub mod artifact;
pub mod classify;
pub mod error;
pub mod exec;
pub mod layer;
pub mod prompt;
pub mod provider;
pub mod runtime;
pub mod sanitize;
pub mod types;

// Re-exports
pub use artifact::ChartArtifact;
pub use classify::FailureCategory;
pub use error::ChartError;
pub use exec::CodeExecutor;
pub use layer::{Layer, LayeredProvider};
pub use provider::Provider;
pub use runtime::{ChartEngine, ChartOutcome};
pub use types::*;

/// Result type alias for chart generation operations
pub type Result<T> = std::result::Result<T, ChartError>;
