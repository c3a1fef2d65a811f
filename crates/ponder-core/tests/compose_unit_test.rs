//! Tests for response composition, run as an integration test so
//! `ScriptedClient`'s `CompletionClient` impl and the crate under test
//! share one build of `ponder-core`.

use ponder_test_utils::ScriptedClient;

use ponder_core::compose::{
    EXECUTION_SYSTEM_PROMPT, build_execution_messages, build_execution_prompt, compose_response,
    render_plan_steps, render_transcript,
};
use ponder_core::completion::{ChatMessage, Role};
use ponder_core::plan::{Plan, PlanStep};
use ponder_core::types::HistoryEntry;

fn two_step_plan() -> Plan {
    Plan {
        steps: vec![
            PlanStep {
                action: "Look up the fact".to_string(),
                reasoning: "Need the underlying data".to_string(),
            },
            PlanStep {
                action: "Summarize".to_string(),
                reasoning: "Caller wants a short answer".to_string(),
            },
        ],
    }
}

fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry::new("user", "hi"),
        HistoryEntry::new("assistant", "hello, how can I help?"),
    ]
}

#[test]
fn transcript_preserves_order_and_count() {
    let transcript = render_transcript(&sample_history());
    assert_eq!(transcript, "user: hi\nassistant: hello, how can I help?");
}

#[test]
fn transcript_of_empty_history_is_empty() {
    assert_eq!(render_transcript(&[]), "");
}

#[test]
fn plan_renders_numbered_actions_only() {
    let rendered = render_plan_steps(&two_step_plan());
    assert_eq!(rendered, "1. Look up the fact\n2. Summarize");
    // Reasoning is intentionally absent from the execution prompt.
    assert!(!rendered.contains("Need the underlying data"));
}

#[test]
fn execution_prompt_embeds_all_sections() {
    let prompt = build_execution_prompt(&sample_history(), "What is 2+2?", &two_step_plan());
    assert!(prompt.contains("Conversation history:\nuser: hi"));
    assert!(prompt.contains(r#"Current request: "What is 2+2?""#));
    assert!(prompt.contains("Your plan:\n1. Look up the fact"));
    assert!(prompt.contains("Now execute this plan"));
}

#[test]
fn execution_prompt_omits_reasoning() {
    let prompt = build_execution_prompt(&[], "q", &two_step_plan());
    assert!(!prompt.contains("Need the underlying data"));
    assert!(!prompt.contains("Caller wants a short answer"));
}

#[test]
fn messages_replay_history_as_structured_turns() {
    let messages = build_execution_messages(&sample_history(), "next question", &two_step_plan());
    // system + 2 history turns + final user prompt
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], ChatMessage::system(EXECUTION_SYSTEM_PROMPT));
    assert_eq!(messages[1], ChatMessage::user("hi"));
    assert_eq!(
        messages[2],
        ChatMessage::assistant("hello, how can I help?")
    );
    assert_eq!(messages[3].role, Role::User);
    assert!(messages[3].content.contains("next question"));
}

#[test]
fn messages_with_empty_history_are_system_plus_prompt() {
    let messages = build_execution_messages(&[], "q", &two_step_plan());
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1].role, Role::User);
}

#[tokio::test]
async fn compose_returns_raw_answer() {
    let client = ScriptedClient::new();
    client.push_text("  the answer, verbatim\n");

    let answer = compose_response(&client, "m", &[], "q", &two_step_plan())
        .await
        .unwrap();
    // No trimming or post-processing of the model's text.
    assert_eq!(answer, "  the answer, verbatim\n");
}

#[tokio::test]
async fn compose_propagates_completion_failure() {
    let client = ScriptedClient::new();
    client.push_error("gateway timeout");

    let result = compose_response(&client, "m", &[], "q", &two_step_plan()).await;
    assert!(result.is_err());
}
