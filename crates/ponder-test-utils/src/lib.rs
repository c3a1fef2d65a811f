//! Shared test utilities for ponder tests.
//!
//! Provides [`ScriptedClient`], a `CompletionClient` that replays a queue
//! of canned replies and records every call it receives, so pipeline and
//! router tests can run without a model service.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use ponder_core::completion::{ChatMessage, CompletionClient, CompletionError};

/// One recorded completion call: the model selector and the full message
/// list as the client received them.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// A completion client driven by a script.
///
/// Push replies in the order calls are expected; each call pops the next
/// one. A call with an exhausted script fails, which keeps tests honest
/// about how many completions a code path performs.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text reply.
    pub fn push_text(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.into()));
    }

    /// Queue a completion-service failure with the given description.
    pub fn push_error(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
    }

    /// Number of completion calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of all recorded calls, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
        });

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(CompletionError::Api {
                status: 500,
                message,
            }),
            None => Err(CompletionError::MalformedPayload(
                "scripted client: no reply queued for this call".to_string(),
            )),
        }
    }
}
