//! Structured error types for the textkit line breaker.
//!
//! Line breaking itself only fails on bad input or a misbehaving width
//! measurer. The remaining variants cover the CLI surface: JSON jobs and
//! embedded font data.

use thiserror::Error;

/// The unified error type returned by all public textkit API functions.
#[derive(Debug, Error)]
pub enum TextkitError {
    /// The inputs to a line-breaking call are inconsistent or unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A width measurer returned a negative or non-finite width.
    #[error("Measurement error: width {width} for range {start}..{end}")]
    MeasurementError { start: usize, end: usize, width: f64 },

    /// A font could not be decoded or parsed.
    #[error("Font error: {0}")]
    FontError(String),

    /// JSON input failed to parse as a valid line-breaking job.
    #[error("Failed to parse job: {source}{}", hint_suffix(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for TextkitError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the job schema. Check `text` and `widthBudgets`.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        TextkitError::ParseError { source: e, hint }
    }
}

pub type Result<T> = std::result::Result<T, TextkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: TextkitError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.contains("Hint: Check for trailing commas"), "got: {msg}");
    }

    #[test]
    fn test_measurement_error_display() {
        let err = TextkitError::MeasurementError {
            start: 2,
            end: 5,
            width: -1.0,
        };
        assert_eq!(err.to_string(), "Measurement error: width -1 for range 2..5");
    }
}
