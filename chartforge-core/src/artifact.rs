//! Chart artifact produced by executing generated code.

use crate::error::ChartError;
use serde_json::Value;

/// A chart produced by executing sanitized code: a Plotly figure in its JSON
/// representation, ready to hand to a rendering boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    figure: Value,
}

impl ChartArtifact {
    /// Wrap a figure value. A null figure is a missing artifact.
    pub fn new(figure: Value) -> Result<Self, ChartError> {
        if figure.is_null() {
            return Err(ChartError::MissingArtifact);
        }
        Ok(Self { figure })
    }

    /// Parse a figure from its JSON text representation.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let figure: Value = serde_json::from_str(json)?;
        Self::new(figure)
    }

    /// The chart title, when the figure carries one.
    pub fn title(&self) -> Option<&str> {
        self.figure
            .pointer("/layout/title/text")
            .or_else(|| self.figure.pointer("/layout/title"))
            .and_then(Value::as_str)
    }

    /// Number of traces in the figure.
    pub fn trace_count(&self) -> usize {
        self.figure
            .pointer("/data")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Borrow the underlying figure value.
    pub fn figure(&self) -> &Value {
        &self.figure
    }

    /// Consume the artifact, returning the figure value.
    pub fn into_figure(self) -> Value {
        self.figure
    }

    /// Serialize the figure back to JSON text.
    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string(&self.figure)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_figure_is_missing_artifact() {
        let err = ChartArtifact::new(Value::Null).unwrap_err();
        assert!(matches!(err, ChartError::MissingArtifact));

        let err = ChartArtifact::from_json("null").unwrap_err();
        assert!(matches!(err, ChartError::MissingArtifact));
    }

    #[test]
    fn test_title_from_nested_layout() {
        let artifact = ChartArtifact::new(json!({
            "data": [{"type": "bar"}],
            "layout": {"title": {"text": "No data found"}}
        }))
        .unwrap();
        assert_eq!(artifact.title(), Some("No data found"));
    }

    #[test]
    fn test_title_from_plain_layout() {
        let artifact = ChartArtifact::new(json!({
            "data": [],
            "layout": {"title": "Heart rate 2024-01-01"}
        }))
        .unwrap();
        assert_eq!(artifact.title(), Some("Heart rate 2024-01-01"));
    }

    #[test]
    fn test_trace_count() {
        let artifact = ChartArtifact::new(json!({
            "data": [{"type": "bar"}, {"type": "scatter"}],
            "layout": {}
        }))
        .unwrap();
        assert_eq!(artifact.trace_count(), 2);

        let empty = ChartArtifact::new(json!({"layout": {}})).unwrap();
        assert_eq!(empty.trace_count(), 0);
    }
}
