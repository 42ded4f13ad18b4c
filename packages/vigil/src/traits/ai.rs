//! Language-model collaborator trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ChatMessage;

/// A text-understanding/completion service.
///
/// Implementations wrap a specific provider (OpenAI, etc.) and handle the
/// specifics of prompting and response parsing. Both operations may fail
/// (network, quota); the dialogue session treats failures as recoverable
/// per-turn conditions, never as fatal.
#[async_trait]
pub trait AssistantModel: Send + Sync {
    /// Complete a conversation under a system instruction, returning the
    /// assistant's reply text.
    async fn complete(&self, messages: &[ChatMessage], system: &str) -> Result<String>;

    /// Complete a single user text under a system instruction demanding
    /// strict JSON, returning the parsed object.
    async fn complete_json(&self, system: &str, user: &str) -> Result<serde_json::Value>;
}
