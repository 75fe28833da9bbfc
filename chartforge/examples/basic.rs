//! End-to-end chart generation using the provider selected from the
//! environment.
//!
//! Set `CHARTFORGE_PROVIDER` to `openai` (default), `azure`, or `groq`, plus
//! that backend's credentials:
//!
//! - OpenAI: `OPENAI_API_KEY`
//! - Groq: `GROQ_API_KEY`
//! - Azure: `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_KEY`,
//!   `OPENAI_API_VERSION`, `DEPLOYMENT_NAME`
//!
//! Run with a prompt:
//!
//! ```sh
//! cargo run --example basic -- "Line chart of average patient heart rate over 7 days"
//! ```

use chartforge::exec::PythonExecutor;
use chartforge::layer::{LoggingLayer, TimeoutLayer};
use chartforge::provider::ProviderKind;
use chartforge::ChartEngine;
use chartforge::Provider;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let model_hint = std::env::var("CHARTFORGE_MODEL").ok();

    let provider = ProviderKind::from_env()?.build_from_env()?;
    println!("Using provider: {}", provider.info().name);

    let engine = ChartEngine::builder(provider)
        .layer(LoggingLayer::new())
        .layer(TimeoutLayer::default())
        .executor(Arc::new(PythonExecutor::new()))
        .finish()?;

    let outcome = engine
        .generate_outcome(&prompt, model_hint.as_deref())
        .await;

    match outcome.figure {
        Some(chart) => {
            if let Some(title) = chart.title() {
                eprintln!("Generated chart: {}", title);
            }
            println!("{}", chart.to_json()?);
        }
        None => {
            eprintln!("{}", outcome.error.unwrap_or_default());
            if outcome.show_retry {
                eprintln!("(re-run with the same prompt to retry)");
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
