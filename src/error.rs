/*!
 * Error handling for field-preparation operations
 *
 * Only configuration and precondition violations surface as hard errors.
 * Datatype-family mismatches and sub-component decode failures degrade
 * to "no record" or "no value" instead, since absent or malformed
 * clinical data is common and must not abort the rest of a segment.
 */

use thiserror::Error;

/// Field-preparation result type
pub type Result<T> = std::result::Result<T, PrepareError>;

/// Hard failures raised by field preparers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    /// Preparer construction failed
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        suggestion: Option<String>,
    },

    /// `prepare()` invoked before the preparer was fully configured
    #[error("Precondition failed for field '{field_tag}': {message}")]
    Precondition {
        message: String,
        field_tag: String,
    },
}

impl PrepareError {
    /// Create a configuration error for a missing field tag
    pub fn missing_field_tag() -> Self {
        Self::Configuration {
            message: "Field tag is missing".to_string(),
            suggestion: Some(
                "Provide a non-empty field tag identifying the semantic field type".to_string(),
            ),
        }
    }

    /// Create a precondition error for a missing message id
    pub fn missing_message_id(field_tag: &str) -> Self {
        Self::Precondition {
            message: "Message ID is required for saving the record. \
                Set the message ID before preparing."
                .to_string(),
            field_tag: field_tag.to_string(),
        }
    }

    /// Create a precondition error for a missing segment
    pub fn missing_segment(field_tag: &str) -> Self {
        Self::Precondition {
            message: "Segment data is missing. Set the segment before preparing.".to_string(),
            field_tag: field_tag.to_string(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration {
                suggestion: Some(suggestion),
                ..
            } => format!("{}\n\nSuggestion: {}", self, suggestion),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_tag_has_suggestion() {
        let err = PrepareError::missing_field_tag();
        assert!(matches!(err, PrepareError::Configuration { .. }));
        assert!(err.user_message().contains("Suggestion:"));
    }

    #[test]
    fn test_precondition_carries_field_tag() {
        let err = PrepareError::missing_segment("PID.3");
        assert!(err.to_string().contains("PID.3"));
    }
}
