//! Runtime layer for chart generation.
//!
//! This module provides the execution layer that sits between the caller and
//! the low-level boundaries (provider chat completion, code execution).
//!
//! The runtime layer is responsible for:
//! - Validating the prompt before any provider is contacted
//! - Dispatching one completion request with uniform tuning parameters
//! - Sanitizing the completion and executing the remaining code
//! - Folding failures into render-ready outcome state

pub mod engine;
pub mod outcome;

pub use engine::ChartEngine;
pub use outcome::ChartOutcome;
