//! Code executor trait: the boundary between sanitized code and the
//! plotting runtime.

use crate::artifact::ChartArtifact;
use crate::error::ChartError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Executes sanitized code and extracts the figure it binds.
///
/// Implementations own the isolation policy (subprocess, interpreter, test
/// double). The contract is the same for all of them: run the code with only
/// the plotting, dataframe, data-fetch, and date/time capabilities in scope,
/// then look up the conventional `fig` binding.
#[async_trait]
pub trait CodeExecutor: Send + Sync + Debug + 'static {
    /// Executor name used in logs
    fn name(&self) -> &str;

    /// Execute the code and return the figure it bound.
    ///
    /// Fails with [`ChartError::Execution`] when the code raises and with
    /// [`ChartError::MissingArtifact`] when `fig` is absent or null after
    /// execution.
    async fn run(&self, code: &str) -> Result<ChartArtifact, ChartError>;
}
