// AI Service Module
//
// The DreamInterpreter trait is the seam between the chat endpoint and
// the concrete provider; the endpoint is tested against stub
// implementations with call counting.

pub mod deepseek;
pub mod error;
pub mod prompt;

use async_trait::async_trait;

pub use deepseek::DeepSeekClient;
pub use error::{AiError, AiResult};
pub use prompt::DREAM_SYSTEM_PROMPT;

/// Trait for dream interpretation providers
#[async_trait]
pub trait DreamInterpreter: Send + Sync {
    /// Turn a validated question into an interpretation.
    ///
    /// Exactly one provider call is issued per invocation; no retries
    /// happen at this layer.
    async fn interpret(&self, question: &str, user_id: Option<&str>) -> AiResult<String>;
}
