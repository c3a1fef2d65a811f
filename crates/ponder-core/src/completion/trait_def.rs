//! The `CompletionClient` trait -- the adapter interface for model backends.
//!
//! The trait is intentionally object-safe so the pipeline can hold an
//! `Arc<dyn CompletionClient>` and tests can substitute a scripted
//! implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::CompletionError;

/// Role of a message sent to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Map a free-form history role string onto the wire enum.
    ///
    /// Callers supply arbitrary role strings in their history; the
    /// completion API accepts only the three known roles. Unrecognized
    /// values are treated as user turns.
    pub fn from_history_role(role: &str) -> Self {
        match role {
            "assistant" => Role::Assistant,
            "system" => Role::System,
            _ => Role::User,
        }
    }
}

/// One message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Adapter interface for text-completion backends.
///
/// The orchestration treats this operation as opaque: an ordered message
/// list goes in, generated text comes out. No streaming, no tool calls,
/// no retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable name for this backend (e.g. "workers-ai").
    fn name(&self) -> &str;

    /// Run one completion against the named model and return the raw
    /// generated text.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError>;
}

// Compile-time assertion: CompletionClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn CompletionClient) {}
};
