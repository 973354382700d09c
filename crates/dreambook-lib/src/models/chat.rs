// Chat data models
//
// Wire shapes for the dream-chat HTTP surface plus the question
// validation applied before anything reaches the provider client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted question length, in characters
pub const MAX_QUESTION_CHARS: usize = 500;

/// Inbound dream-chat request body.
///
/// `question` is kept as a raw JSON value so that "missing" and
/// "present but not a string" stay distinguishable for validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<serde_json::Value>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful interpretation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
}

/// Flat error response body, shared by all failure kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Question validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question must not be empty")]
    Empty,

    #[error("question must be a string")]
    NotAString,

    #[error("question must not exceed 500 characters")]
    TooLong,
}

/// Validate the question of an inbound chat request.
///
/// First failing rule wins: missing/empty, then type, then trimmed
/// emptiness, then length. Returns the question text untrimmed; the
/// trim is only used for the emptiness check.
pub fn validate_question(request: &ChatRequest) -> Result<&str, ValidationError> {
    let value = match &request.question {
        None | Some(serde_json::Value::Null) => return Err(ValidationError::Empty),
        Some(value) => value,
    };

    let question = match value.as_str() {
        Some(q) => q,
        None => return Err(ValidationError::NotAString),
    };

    if question.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ValidationError::TooLong);
    }

    Ok(question)
}

/// Truncated single-line preview of a question for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(question: serde_json::Value) -> ChatRequest {
        ChatRequest {
            question: Some(question),
            user_id: None,
        }
    }

    #[test]
    fn test_missing_question() {
        let req = ChatRequest {
            question: None,
            user_id: None,
        };
        assert_eq!(validate_question(&req), Err(ValidationError::Empty));
    }

    #[test]
    fn test_null_question() {
        assert_eq!(
            validate_question(&request(json!(null))),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_empty_question() {
        assert_eq!(
            validate_question(&request(json!(""))),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_whitespace_only_question() {
        assert_eq!(
            validate_question(&request(json!("   \t  "))),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_non_string_question() {
        assert_eq!(
            validate_question(&request(json!(42))),
            Err(ValidationError::NotAString)
        );
        assert_eq!(
            validate_question(&request(json!({"text": "dream"}))),
            Err(ValidationError::NotAString)
        );
        assert_eq!(
            validate_question(&request(json!(["dream"]))),
            Err(ValidationError::NotAString)
        );
    }

    #[test]
    fn test_over_length_question() {
        let long = "梦".repeat(501);
        assert_eq!(
            validate_question(&request(json!(long))),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn test_boundary_length_passes() {
        let exact = "a".repeat(500);
        let req = request(json!(exact.clone()));
        assert_eq!(validate_question(&req), Ok(exact.as_str()));
    }

    #[test]
    fn test_valid_question_untrimmed() {
        let req = request(json!("  I dreamt of flying  "));
        assert_eq!(validate_question(&req), Ok("  I dreamt of flying  "));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::Empty.to_string(),
            "question must not be empty"
        );
        assert_eq!(
            ValidationError::NotAString.to_string(),
            "question must be a string"
        );
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "question must not exceed 500 characters"
        );
    }

    #[test]
    fn test_preview_truncation() {
        assert_eq!(preview("short", 50), "short");
        let long = "x".repeat(60);
        let p = preview(&long, 50);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 53);
    }

    #[test]
    fn test_preview_multibyte_safe() {
        let dream = "梦".repeat(10);
        assert_eq!(preview(&dream, 4), "梦梦梦梦...");
    }
}
