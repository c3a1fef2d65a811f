//! Response composition: the execution prompt and the second completion.
//!
//! The execution call sees the conversation twice on purpose: once as a
//! transcript embedded in the prompt text, and once replayed as structured
//! turns. The redundancy biases the model toward following the plan while
//! preserving conversational continuity. The plan appears as a numbered
//! list of step actions only; step reasoning never reaches this prompt.

use crate::completion::{ChatMessage, CompletionClient, CompletionError, Role};
use crate::plan::Plan;
use crate::types::HistoryEntry;

/// System instruction for the execution call.
pub const EXECUTION_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that provides thorough, well-reasoned answers.";

/// Render history as a newline-joined `role: content` transcript, oldest
/// first. Order and entry count are preserved exactly; an empty history
/// renders as an empty string.
pub fn render_transcript(history: &[HistoryEntry]) -> String {
    history
        .iter()
        .map(|h| format!("{}: {}", h.role, h.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the plan as a numbered list of step actions.
pub fn render_plan_steps(plan: &Plan) -> String {
    plan.steps
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s.action))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the execution prompt: transcript, the current message verbatim,
/// and the numbered plan.
pub fn build_execution_prompt(history: &[HistoryEntry], message: &str, plan: &Plan) -> String {
    format!(
        r#"You are an AI assistant that thinks step-by-step.

Conversation history:
{transcript}

Current request: "{message}"

Your plan:
{steps}

Now execute this plan and provide a comprehensive, helpful response."#,
        transcript = render_transcript(history),
        steps = render_plan_steps(plan),
    )
}

/// Build the full execution message list: system instruction, the history
/// replayed as structured turns, then the execution prompt as a final user
/// message.
pub fn build_execution_messages(
    history: &[HistoryEntry],
    message: &str,
    plan: &Plan,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(EXECUTION_SYSTEM_PROMPT));
    for entry in history {
        messages.push(ChatMessage {
            role: Role::from_history_role(&entry.role),
            content: entry.content.clone(),
        });
    }
    messages.push(ChatMessage::user(build_execution_prompt(
        history, message, plan,
    )));
    messages
}

/// Run the execution completion and return the model's raw answer text,
/// unmodified. Fails only if the completion call itself fails.
pub async fn compose_response(
    client: &dyn CompletionClient,
    model: &str,
    history: &[HistoryEntry],
    message: &str,
    plan: &Plan,
) -> Result<String, CompletionError> {
    let messages = build_execution_messages(history, message, plan);
    client.complete(model, &messages).await
}
