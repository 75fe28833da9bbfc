//! Render-ready outcome of a chart request.

use crate::artifact::ChartArtifact;
use crate::classify::FailureCategory;
use crate::error::ChartError;

/// The outcome of one chart request, shaped the way a host renders it: a
/// figure, an error message, and whether a retry affordance applies.
///
/// Every failure degrades to "no figure plus a message" - the previous chart
/// is cleared, nothing is fatal.
#[derive(Debug, Clone)]
pub struct ChartOutcome {
    /// The generated figure, present only on success
    pub figure: Option<ChartArtifact>,
    /// User-visible error message, present only on failure
    pub error: Option<String>,
    /// Whether the host should offer a retry action
    pub show_retry: bool,
}

impl ChartOutcome {
    /// A successful outcome carrying the figure.
    pub fn success(figure: ChartArtifact) -> Self {
        Self {
            figure: Some(figure),
            error: None,
            show_retry: false,
        }
    }

    /// A failed outcome carrying the classified user message.
    ///
    /// An empty prompt is the one failure with its own wording and no retry
    /// affordance: retrying without typing a prompt cannot succeed.
    pub fn failure(err: &ChartError) -> Self {
        let (message, show_retry) = match err {
            ChartError::InvalidRequest(_) => ("Error: Please enter a prompt.".to_string(), false),
            _ => (FailureCategory::user_message(err), true),
        };
        Self {
            figure: None,
            error: Some(message),
            show_retry,
        }
    }

    /// Whether this outcome carries a figure.
    pub fn is_success(&self) -> bool {
        self.figure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_has_no_error() {
        let artifact = ChartArtifact::new(json!({"data": [], "layout": {}})).unwrap();
        let outcome = ChartOutcome::success(artifact);
        assert!(outcome.is_success());
        assert!(outcome.error.is_none());
        assert!(!outcome.show_retry);
    }

    #[test]
    fn test_empty_prompt_has_own_message_and_no_retry() {
        let outcome = ChartOutcome::failure(&ChartError::invalid_request("prompt is empty"));
        assert_eq!(outcome.error.as_deref(), Some("Error: Please enter a prompt."));
        assert!(!outcome.show_retry);
        assert!(outcome.figure.is_none());
    }

    #[test]
    fn test_failure_clears_figure_and_offers_retry() {
        let outcome = ChartOutcome::failure(&ChartError::provider("connection refused"));
        assert!(outcome.figure.is_none());
        assert!(outcome.show_retry);
        assert!(outcome.error.unwrap().contains("API key or network connection"));
    }
}
