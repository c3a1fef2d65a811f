//! Wire types for the chat boundary.
//!
//! [`ChatRequest`] is what callers send; [`ChatResponse`] is what they get
//! back. Everything here lives for exactly one request and is never
//! mutated after construction.

use serde::{Deserialize, Serialize};

/// Incoming chat request: the current message plus prior turns.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior conversation turns, oldest first. Passed through verbatim --
    /// no reordering, deduplication, or truncation.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One prior conversation turn. The role is a free-form string as supplied
/// by the caller; it is only interpreted when replayed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A plan step re-projected for output: the step's `reasoning` is surfaced
/// as its `result` (or `"Completed"` when the model gave none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub action: String,
    pub result: String,
}

/// The annotated plan returned alongside the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub steps: Vec<StepResult>,
}

/// Final payload: the model's answer plus the step-result view of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub workflow: Workflow,
}
