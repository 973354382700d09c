// DeepSeek Provider Implementation
//
// One chat-completion call per interpretation, bounded by the
// configured timeout. Non-2xx statuses and transport failures are
// classified into the AiError taxonomy; nothing is retried here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AiError, AiResult, DreamInterpreter, DREAM_SYSTEM_PROMPT};
use crate::config::DeepSeekConfig;
use crate::models::chat::preview;

/// DeepSeek chat-completion client
pub struct DeepSeekClient {
    config: DeepSeekConfig,
    client: Client,
}

impl DeepSeekClient {
    pub fn new(config: DeepSeekConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        let base = self.config.api_url.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Fire a minimal interpretation request to verify connectivity
    /// and credentials.
    pub async fn test_connection(&self) -> bool {
        match self.interpret("connection test", None).await {
            Ok(_) => true,
            Err(e) => {
                log::error!("[deepseek] connection test failed: {}", e);
                false
            }
        }
    }
}

// DeepSeek API wire types (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

#[async_trait]
impl DreamInterpreter for DeepSeekClient {
    async fn interpret(&self, question: &str, user_id: Option<&str>) -> AiResult<String> {
        let url = self.api_url("/chat/completions");

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: DREAM_SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            user: user_id.map(String::from),
        };

        log::info!(
            "[deepseek] calling chat completion for question \"{}\"",
            preview(question, 50)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[deepseek] API error {}: {}", status, preview(&body, 200));

            return Err(match status.as_u16() {
                401 => AiError::AuthFailed,
                429 => AiError::RateLimited,
                s if s >= 500 => AiError::Unavailable,
                s => AiError::Api(s),
            });
        }

        // Body reads count against the request timeout too; let the
        // From impl keep timeout and decode failures distinct
        let data: CompletionResponse = response.json().await.map_err(AiError::from)?;

        if let Some(usage) = &data.usage {
            log::debug!(
                "[deepseek] tokens used: {:?} (prompt: {:?}, completion: {:?})",
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let answer = data
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AiError::InvalidResponse)?;

        log::info!("[deepseek] response received: \"{}\"", preview(&answer, 100));

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DeepSeekClient {
        let config = DeepSeekConfig {
            api_key: "sk-test".to_string(),
            api_url: server.uri(),
            ..DeepSeekConfig::default()
        };
        DeepSeekClient::new(config)
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 40, "total_tokens": 60}
        })
    }

    #[tokio::test]
    async fn test_successful_interpretation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek-chat",
                "messages": [{"role": "system"}, {"role": "user", "content": "a falling dream"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("X")))
            .mount(&server)
            .await;

        let answer = client_for(&server)
            .interpret("a falling dream", None)
            .await
            .unwrap();
        assert_eq!(answer, "X");
    }

    #[tokio::test]
    async fn test_user_id_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"user": "kiosk-7"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client_for(&server)
            .interpret("a dream", Some("kiosk-7"))
            .await
            .unwrap();
        assert_eq!(answer, "ok");
    }

    #[tokio::test]
    async fn test_401_is_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::AuthFailed));
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::RateLimited));
    }

    #[tokio::test]
    async fn test_5xx_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::Unavailable));
    }

    #[tokio::test]
    async fn test_other_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(418))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::Api(418)));
    }

    #[tokio::test]
    async fn test_missing_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_empty_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("")))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_timeout_aborts_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = DeepSeekConfig {
            api_key: "sk-test".to_string(),
            api_url: server.uri(),
            timeout: Duration::from_millis(200),
            ..DeepSeekConfig::default()
        };
        let client = DeepSeekClient::new(config);

        let start = std::time::Instant::now();
        let err = client.interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::Timeout));
        assert!(err.to_string().contains("timed out"));
        // Aborted around the configured timeout, well before the delay
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_timeout_during_body_read_is_timeout() {
        use tokio::io::AsyncWriteExt;

        // Server promises a 1000-byte body, sends a few bytes, then
        // stalls; the abort must classify as Timeout, not as a
        // malformed response
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 1000\r\n\r\n{\"choices\"",
                )
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config = DeepSeekConfig {
            api_key: "sk-test".to_string(),
            api_url: format!("http://{}", addr),
            timeout: Duration::from_millis(300),
            ..DeepSeekConfig::default()
        };
        let client = DeepSeekClient::new(config);

        let err = client.interpret("q", None).await.unwrap_err();
        assert!(
            matches!(err, AiError::Timeout),
            "expected Timeout, got: {err:?}"
        );
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_connection_maps_outcome_to_bool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hello")))
            .mount(&server)
            .await;
        assert!(client_for(&server).test_connection().await);

        let bad = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&bad)
            .await;
        assert!(!client_for(&bad).test_connection().await);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port from a listener that is immediately dropped
        let config = DeepSeekConfig {
            api_key: "sk-test".to_string(),
            api_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            ..DeepSeekConfig::default()
        };
        let client = DeepSeekClient::new(config);

        let err = client.interpret("q", None).await.unwrap_err();
        assert!(matches!(err, AiError::ConnectionFailed));
        assert!(err.to_string().contains("network"));
    }
}
