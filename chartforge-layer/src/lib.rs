//! # chartforge layers
//!
//! Built-in layers for chartforge.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs all provider operations with timing information
//! - `TimeoutLayer`: Enforces one uniform deadline on every provider call
//!
//! ## Usage
//!
//! ```ignore
//! use chartforge_core::ChartEngine;
//! use chartforge_layer::{LoggingLayer, TimeoutLayer};
//!
//! let engine = ChartEngine::builder(provider)
//!     .layer(LoggingLayer::new())
//!     .layer(TimeoutLayer::new(Duration::from_secs(30)))
//!     .executor(executor)
//!     .finish()?;
//! ```

pub mod logging;
pub mod timeout;

// Re-exports
pub use logging::LoggingLayer;
pub use timeout::TimeoutLayer;
