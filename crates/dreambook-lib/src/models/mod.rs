// Dreambook data models

pub mod chat;

pub use chat::{validate_question, ChatAnswer, ChatRequest, ErrorBody, ValidationError};
