// Dreambook shared library
//
// Shared between the backend server binary and the kiosk host:
// configuration, chat data models, the DeepSeek provider client,
// and the UI-facing client SDK.

pub mod config;
pub mod models;
pub mod services;

pub use config::{AppConfig, ConfigError, DeepSeekConfig};
pub use services::ai::{AiError, AiResult, DreamInterpreter};
