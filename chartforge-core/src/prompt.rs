//! Prompt contract shared by every provider.
//!
//! The system instruction is the output contract between this system and the
//! model: code only, all data inline, a figure bound to `fig`, and the data's
//! date(s) in the chart title. It is identical across providers.

use crate::error::ChartError;
use crate::types::Message;

/// System instruction describing the required output of the model.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a Python developer tasked with generating only Plotly Express code. \
     Your response must contain ONLY the Python code with no explanations, comments, \
     or additional text. Do not include backticks, markdown, or any other formatting. \
     The code should include all necessary data definitions (e.g., DataFrames or dictionaries), \
     REAL data, python imports, and variable assignments. You MUST provide all data. \
     Verify the existence of data being asked for, before attempting to plot. \
     If there is no data, draw an empty chart with title saying \"No data found\". \
     Do not reference any csv files. If you use package yfinance, be sure to return a 'fig' and do 'fig.show()'. \
     You should convert the 2D array of shape (252, 1) into a 1D array, which is what plotly.express expects. \
     Example: y=data[\"Close\"].squeeze(). \
     ALWAYS give the date or dates of the data in the title.";

/// Build the user instruction for a chart request.
pub fn user_instruction(prompt: &str) -> String {
    format!(
        "Generate only the Plotly Express Python code for: {}. No explanations or text, just the code.",
        prompt
    )
}

/// Validate and normalize a user prompt.
///
/// The prompt must contain at least one non-whitespace character. Validation
/// happens before any provider is contacted.
pub fn validate_prompt(prompt: &str) -> Result<&str, ChartError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ChartError::invalid_request("prompt is empty"));
    }
    Ok(trimmed)
}

/// Build the message list for a chart request: the fixed system instruction
/// followed by the templated user instruction.
pub fn build_messages(prompt: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_INSTRUCTION),
        Message::user(user_instruction(prompt)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(validate_prompt("").is_err());
        assert!(validate_prompt("   \n\t  ").is_err());
    }

    #[test]
    fn test_prompt_trimmed() {
        let prompt = validate_prompt("  line chart of heart rate  ").unwrap();
        assert_eq!(prompt, "line chart of heart rate");
    }

    #[test]
    fn test_message_shape() {
        let messages = build_messages("pie chart of browser share");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("pie chart of browser share"));
        assert!(messages[1].content.starts_with("Generate only the Plotly Express Python code"));
    }
}
