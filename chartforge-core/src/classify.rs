//! User-facing failure classification.
//!
//! Maps structured error kinds onto the five categories a host shows to the
//! user. Classification is on kind, never on message text.

use crate::error::ChartError;

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Provider, network, or credential trouble
    Api,
    /// The model produced code that does not run
    InvalidCode,
    /// The model answered with prose instead of code
    ExtraneousText,
    /// Execution finished but produced no usable chart
    MissingChart,
    /// Anything else, echoed raw
    Unexpected,
}

impl FailureCategory {
    /// Classify an error by its kind.
    pub fn of(err: &ChartError) -> Self {
        match err {
            e if e.is_provider_side() => Self::Api,
            ChartError::Configuration(_) => Self::Api,
            ChartError::Execution(_) => Self::InvalidCode,
            ChartError::EmptyCode => Self::ExtraneousText,
            ChartError::MissingArtifact => Self::MissingChart,
            _ => Self::Unexpected,
        }
    }

    /// Render the user-visible message for an error.
    pub fn user_message(err: &ChartError) -> String {
        let detail = match Self::of(err) {
            Self::Api => "Please check your API key or network connection.".to_string(),
            Self::InvalidCode => {
                "The AI generated invalid code. Please refine your prompt and try again."
                    .to_string()
            }
            Self::ExtraneousText => {
                "The AI included extra text instead of just code. Please try again or adjust the prompt."
                    .to_string()
            }
            Self::MissingChart => {
                "The chart could not be created. Check if the data or prompt is valid, or try a different chart type."
                    .to_string()
            }
            Self::Unexpected => format!(
                "Unexpected error: {}. Please try a different prompt or contact support.",
                err
            ),
        };
        format!("Error: An issue occurred while generating the chart. {}", detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_errors_classify_as_api() {
        for err in [
            ChartError::provider("connection refused"),
            ChartError::authentication("bad key"),
            ChartError::rate_limit("429"),
            ChartError::timeout("deadline elapsed"),
            ChartError::configuration("missing endpoint"),
        ] {
            assert_eq!(FailureCategory::of(&err), FailureCategory::Api);
            assert!(FailureCategory::user_message(&err).contains("API key or network connection"));
        }
    }

    #[test]
    fn test_reference_error_is_invalid_code_not_generic() {
        let err = ChartError::execution("NameError: name 'dff' is not defined");
        assert_eq!(FailureCategory::of(&err), FailureCategory::InvalidCode);
        let msg = FailureCategory::user_message(&err);
        assert!(msg.contains("The AI generated invalid code"));
        assert!(!msg.contains("Unexpected error"));
    }

    #[test]
    fn test_empty_code_is_extraneous_text() {
        let err = ChartError::EmptyCode;
        assert_eq!(FailureCategory::of(&err), FailureCategory::ExtraneousText);
        assert!(FailureCategory::user_message(&err).contains("extra text instead of just code"));
    }

    #[test]
    fn test_missing_artifact_is_missing_chart() {
        let err = ChartError::MissingArtifact;
        assert_eq!(FailureCategory::of(&err), FailureCategory::MissingChart);
        assert!(FailureCategory::user_message(&err).contains("The chart could not be created"));
    }

    #[test]
    fn test_unexpected_echoes_raw_message() {
        let err = ChartError::other("disk on fire");
        assert_eq!(FailureCategory::of(&err), FailureCategory::Unexpected);
        assert!(FailureCategory::user_message(&err).contains("disk on fire"));
    }
}
