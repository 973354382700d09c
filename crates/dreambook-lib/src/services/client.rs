// Dream chat client SDK
//
// Thin UI-facing wrapper over the backend HTTP surface. Re-validates
// the question on the client side so obviously bad input never leaves
// the kiosk, surfaces the server's error string verbatim, and falls
// back to a generic unreachable message when the backend is down.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::models::chat::{ChatAnswer, ErrorBody, MAX_QUESTION_CHARS};

/// Timeout for the availability probe
const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Client-side error for dream chat calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("question must not exceed 500 characters")]
    QuestionTooLong,

    /// Error string reported by the backend, passed through verbatim
    #[error("{0}")]
    Service(String),

    /// The backend could not be reached at all
    #[error("AI service is unavailable, retry later")]
    Unreachable,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskBody<'a> {
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

/// Backend service status, as reported by `GET /health`
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub timestamp: i64,
    pub version: Option<String>,
}

/// Client for the dream chat backend
pub struct DreamChatClient {
    base_url: String,
    client: reqwest::Client,
}

impl DreamChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask for a dream interpretation.
    pub async fn ask(&self, question: &str, user_id: Option<&str>) -> Result<String, ClientError> {
        if question.trim().is_empty() {
            return Err(ClientError::EmptyQuestion);
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(ClientError::QuestionTooLong);
        }

        let body = AskBody { question, user_id };

        let response = self
            .client
            .post(self.url("/api/dream-chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("[client] dream chat request failed: {}", e);
                ClientError::Unreachable
            })?;

        if !response.status().is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_default();
            if error.is_empty() {
                return Err(ClientError::Unreachable);
            }
            return Err(ClientError::Service(error));
        }

        let answer = response
            .json::<ChatAnswer>()
            .await
            .map_err(|_| ClientError::Unreachable)?;

        Ok(answer.answer)
    }

    /// Probe `GET /health` and report whether the backend is serving.
    pub async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.url("/health"))
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Fetch the full health payload, or None if unreachable.
    pub async fn status(&self) -> Option<ServiceStatus> {
        let response = self
            .client
            .get(self.url("/health"))
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }
}
