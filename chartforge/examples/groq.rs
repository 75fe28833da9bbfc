//! Chart generation through Groq's OpenAI-compatible endpoint.
//!
//! Groq speaks the OpenAI chat-completions protocol; the convenience
//! constructor only swaps the endpoint and provider id.
//!
//! ```sh
//! GROQ_API_KEY=... cargo run --example groq -- "Pie chart of desktop browser market share"
//! ```

use chartforge::exec::PythonExecutor;
use chartforge::layer::{LoggingLayer, TimeoutLayer};
use chartforge::provider::groq;
use chartforge::ChartEngine;
use std::sync::Arc;

const GROQ_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let api_key =
        std::env::var("GROQ_API_KEY").expect("GROQ_API_KEY environment variable not set");
    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let provider = groq(api_key)?;

    let engine = ChartEngine::builder(provider)
        .layer(LoggingLayer::new())
        .layer(TimeoutLayer::default())
        .executor(Arc::new(PythonExecutor::new()))
        .default_model(GROQ_MODEL)
        .finish()?;

    match engine.generate(&prompt, None).await {
        Ok(chart) => println!("{}", chart.to_json()?),
        Err(err) => {
            eprintln!("{}", chartforge::FailureCategory::user_message(&err));
            std::process::exit(1);
        }
    }

    Ok(())
}
