//! Python subprocess executor for generated Plotly code.
//!
//! The generated code runs in a separate Python process, never in the host.
//! A small driver seeds the namespace with the plotting, dataframe,
//! data-fetch, and date/time modules, executes the code read from stdin, and
//! reports the bound figure as sentinel-delimited JSON on stdout. The
//! sentinels keep the figure JSON recoverable even when executed code prints
//! to stdout itself.

use async_trait::async_trait;
use chartforge_core::artifact::ChartArtifact;
use chartforge_core::error::ChartError;
use chartforge_core::exec::CodeExecutor;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Exit code the driver uses when the code ran but bound no usable `fig`.
const MISSING_FIG_EXIT: i32 = 3;

const FIGURE_BEGIN: &str = "<<<chartforge:figure>>>";
const FIGURE_END: &str = "<<<chartforge:end>>>";

/// Driver script run inside the subprocess.
const DRIVER: &str = r#"
import datetime
import sys

import pandas as pd
import plotly.express as px
import plotly.io as pio

try:
    import pandas_datareader as pdr
except ImportError:
    pdr = None

# fig.show() must not reach for a browser in a headless child.
pio.renderers.default = "json"

namespace = {"px": px, "pd": pd, "pdr": pdr, "datetime": datetime}
exec(sys.stdin.read(), namespace)

fig = namespace.get("fig")
if fig is None:
    sys.exit(3)

sys.stdout.write("<<<chartforge:figure>>>")
sys.stdout.write(fig.to_json())
sys.stdout.write("<<<chartforge:end>>>")
"#;

/// Default deadline for one execution.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Executes sanitized code in an isolated Python subprocess.
#[derive(Debug, Clone)]
pub struct PythonExecutor {
    python: PathBuf,
    deadline: Duration,
}

impl PythonExecutor {
    /// Create an executor using `python3` from PATH
    pub fn new() -> Self {
        Self {
            python: PathBuf::from("python3"),
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Use a specific Python interpreter
    pub fn with_python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = python.into();
        self
    }

    /// Set the execution deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeExecutor for PythonExecutor {
    fn name(&self) -> &str {
        "python"
    }

    async fn run(&self, code: &str) -> Result<ChartArtifact, ChartError> {
        tracing::debug!(
            python = %self.python.display(),
            lines = code.lines().count(),
            "spawning execution subprocess"
        );

        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(DRIVER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ChartError::execution(format!(
                    "failed to spawn {}: {}",
                    self.python.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChartError::execution("executor stdin unavailable"))?;
        stdin
            .write_all(code.as_bytes())
            .await
            .map_err(|e| ChartError::execution(format!("failed to write code: {}", e)))?;
        drop(stdin);

        // kill_on_drop reaps the child when the deadline branch drops the
        // wait future.
        let output = tokio::time::timeout(self.deadline, child.wait_with_output())
            .await
            .map_err(|_| {
                ChartError::timeout(format!(
                    "execution did not finish within {:?}",
                    self.deadline
                ))
            })?
            .map_err(|e| ChartError::execution(e.to_string()))?;

        interpret(
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Interpret the driver's exit code and streams.
fn interpret(code: Option<i32>, stdout: &str, stderr: &str) -> Result<ChartArtifact, ChartError> {
    match code {
        Some(0) => {
            let json = stdout
                .split(FIGURE_BEGIN)
                .nth(1)
                .and_then(|rest| rest.split(FIGURE_END).next())
                .ok_or_else(|| {
                    ChartError::execution("figure markers missing from executor output")
                })?;
            ChartArtifact::from_json(json)
        }
        Some(MISSING_FIG_EXIT) => Err(ChartError::MissingArtifact),
        _ => Err(ChartError::execution(error_line(stderr))),
    }
}

/// The last non-empty stderr line: for a Python traceback, the
/// `SomeError: message` line.
fn error_line(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("execution failed with no diagnostic output")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_figure_between_markers() {
        let stdout = format!(
            "{}{}{}",
            FIGURE_BEGIN,
            r#"{"data": [], "layout": {"title": {"text": "No data found"}}}"#,
            FIGURE_END
        );
        let artifact = interpret(Some(0), &stdout, "").unwrap();
        assert_eq!(artifact.title(), Some("No data found"));
    }

    #[test]
    fn test_interpret_ignores_noise_around_markers() {
        let stdout = format!(
            "[*** download noise ***]\n{}{}{}trailing",
            FIGURE_BEGIN,
            r#"{"data": [{"type": "bar"}], "layout": {}}"#,
            FIGURE_END
        );
        let artifact = interpret(Some(0), &stdout, "").unwrap();
        assert_eq!(artifact.trace_count(), 1);
    }

    #[test]
    fn test_interpret_missing_fig_exit() {
        let err = interpret(Some(MISSING_FIG_EXIT), "", "").unwrap_err();
        assert!(matches!(err, ChartError::MissingArtifact));
    }

    #[test]
    fn test_interpret_null_figure_is_missing_artifact() {
        let stdout = format!("{}null{}", FIGURE_BEGIN, FIGURE_END);
        let err = interpret(Some(0), &stdout, "").unwrap_err();
        assert!(matches!(err, ChartError::MissingArtifact));
    }

    #[test]
    fn test_interpret_traceback_keeps_final_error_line() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 12, in <module>\n  File \"<string>\", line 2, in <module>\nNameError: name 'dff' is not defined\n";
        let err = interpret(Some(1), "", stderr).unwrap_err();
        match err {
            ChartError::Execution(msg) => {
                assert_eq!(msg, "NameError: name 'dff' is not defined")
            }
            other => panic!("expected execution error, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_success_without_markers_is_execution_error() {
        let err = interpret(Some(0), "the code printed prose", "").unwrap_err();
        assert!(matches!(err, ChartError::Execution(_)));
    }

    #[test]
    fn test_driver_marker_constants_match() {
        // The driver embeds the markers literally; keep them in sync.
        assert!(DRIVER.contains(FIGURE_BEGIN));
        assert!(DRIVER.contains(FIGURE_END));
        assert!(DRIVER.contains("sys.exit(3)"));
    }
}
