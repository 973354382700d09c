// AI provider error taxonomy
//
// Distinct classification per failure kind so the UI can show
// actionable messages (bad key vs. rate limit vs. outage vs. network)
// without leaking raw provider payloads. The HTTP boundary flattens
// all of these into one `{error}` shape; the distinction is kept here.

use thiserror::Error;

/// AI provider error
#[derive(Error, Debug)]
pub enum AiError {
    /// Provider rejected the API key
    #[error("invalid API key, check the DeepSeek configuration")]
    AuthFailed,

    /// Provider throttled the request
    #[error("rate limited by the AI provider, retry later")]
    RateLimited,

    /// Provider-side 5xx
    #[error("AI provider temporarily unavailable, retry later")]
    Unavailable,

    /// Any other non-2xx status from the provider
    #[error("AI provider error: {0}")]
    Api(u16),

    /// 2xx but the expected content was missing
    #[error("invalid response structure from provider")]
    InvalidResponse,

    /// Request exceeded the configured timeout
    #[error("request timed out, retry later")]
    Timeout,

    /// DNS/connection-level failure
    #[error("network connection failed")]
    ConnectionFailed,

    /// Anything unexpected, propagated unchanged
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else if err.is_connect() {
            AiError::ConnectionFailed
        } else if err.is_decode() {
            AiError::InvalidResponse
        } else {
            AiError::Other(err.to_string())
        }
    }
}

/// Result type for AI operations
pub type AiResult<T> = Result<T, AiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_actionable() {
        assert!(AiError::AuthFailed.to_string().contains("API key"));
        assert!(AiError::RateLimited.to_string().contains("retry later"));
        assert!(AiError::Unavailable.to_string().contains("unavailable"));
        assert!(AiError::Timeout.to_string().contains("timed out"));
        assert!(AiError::ConnectionFailed.to_string().contains("network"));
        assert!(AiError::InvalidResponse
            .to_string()
            .contains("invalid response structure"));
        assert_eq!(AiError::Api(418).to_string(), "AI provider error: 418");
    }

    #[test]
    fn test_other_propagates_unchanged() {
        let err = AiError::Other("something odd".to_string());
        assert_eq!(err.to_string(), "something odd");
    }
}
