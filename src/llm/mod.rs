//! Completion client trait and implementations.
//!
//! This module provides the abstraction for requesting free-text analysis
//! from a chat-completion API.
//!
//! # Overview
//!
//! The [`CompletionDriver`] trait defines the single-shot completion
//! interface. The affinity handler sends a system instruction plus a user
//! message and receives the assistant's analysis as plain text.
//!
//! # Drivers
//!
//! - [`ChatCompletionsDriver`]: `OpenAI`-compatible Chat Completions API
//!   (`/v1/chat/completions`), non-streaming.

pub mod chat_completions;

pub use chat_completions::ChatCompletionsDriver;

/// Completion connection and model settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL for the completion API (e.g. `https://api.openai.com`).
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier (e.g. `gpt-4`).
    pub model: String,
}

/// A message in a completion request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Text content of the message.
    pub content: String,
}

impl Message {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt.
    System,
    /// User message.
    User,
    /// Assistant response.
    Assistant,
}

/// Trait for completion clients.
#[async_trait::async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Request a completion for the given messages and return the
    /// assistant's reply as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// assistant content.
    async fn complete(&self, messages: &[Message]) -> anyhow::Result<String>;
}
