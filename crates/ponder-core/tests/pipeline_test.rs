//! Integration tests for the full plan-then-execute pipeline, run against
//! the scripted completion client.

use ponder_core::pipeline::run_chat;
use ponder_core::plan::fallback_plan;
use ponder_core::types::{ChatRequest, HistoryEntry};
use ponder_test_utils::ScriptedClient;

fn request(message: &str, history: Vec<HistoryEntry>) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        history,
    }
}

#[tokio::test]
async fn five_step_plan_passes_through_unchanged() {
    let client = ScriptedClient::new();
    client.push_text(
        r#"{"steps": [
            {"action": "Parse the question", "reasoning": "Know what is asked"},
            {"action": "Identify constraints", "reasoning": "Bound the answer"},
            {"action": "Recall relevant facts", "reasoning": "Ground the response"},
            {"action": "Draft the answer", "reasoning": "Assemble the pieces"},
            {"action": "Review for clarity", "reasoning": "Catch mistakes"}
        ]}"#,
    );
    client.push_text("a thorough answer");

    let response = run_chat(&client, "test-model", &request("explain monads", vec![]))
        .await
        .unwrap();

    let actions: Vec<&str> = response
        .workflow
        .steps
        .iter()
        .map(|s| s.action.as_str())
        .collect();
    assert_eq!(
        actions,
        [
            "Parse the question",
            "Identify constraints",
            "Recall relevant facts",
            "Draft the answer",
            "Review for clarity"
        ]
    );
    assert_eq!(response.response, "a thorough answer");
}

#[tokio::test]
async fn missing_reasoning_becomes_completed_end_to_end() {
    let client = ScriptedClient::new();
    client.push_text(
        r#"{"steps": [
            {"action": "Just answer"},
            {"action": "Cite a source", "reasoning": "Builds trust"}
        ]}"#,
    );
    client.push_text("ok");

    let response = run_chat(&client, "test-model", &request("q", vec![]))
        .await
        .unwrap();

    assert_eq!(response.workflow.steps[0].result, "Completed");
    assert_eq!(response.workflow.steps[1].result, "Builds trust");
}

#[tokio::test]
async fn model_selector_reaches_both_calls() {
    let client = ScriptedClient::new();
    client.push_text(r#"{"steps": [{"action": "a", "reasoning": "b"}]}"#);
    client.push_text("done");

    run_chat(&client, "@cf/meta/llama-3.3-70b-instruct-fp8-fast", &request("q", vec![]))
        .await
        .unwrap();

    for call in client.calls() {
        assert_eq!(call.model, "@cf/meta/llama-3.3-70b-instruct-fp8-fast");
    }
}

#[tokio::test]
async fn empty_history_renders_empty_transcript_section() {
    let client = ScriptedClient::new();
    client.push_text(r#"{"steps": [{"action": "a", "reasoning": "b"}]}"#);
    client.push_text("done");

    run_chat(&client, "m", &request("q", vec![])).await.unwrap();

    let calls = client.calls();
    let prompt = &calls[1].messages.last().unwrap().content;
    // The history section is present but empty.
    assert!(prompt.contains("Conversation history:\n\n"));
}

#[tokio::test]
async fn long_history_is_replayed_in_full_and_in_order() {
    let client = ScriptedClient::new();
    client.push_text(r#"{"steps": [{"action": "a", "reasoning": "b"}]}"#);
    client.push_text("done");

    let history: Vec<HistoryEntry> = (0..20)
        .map(|i| {
            let role = if i % 2 == 0 { "user" } else { "assistant" };
            HistoryEntry::new(role, format!("turn {i}"))
        })
        .collect();

    run_chat(&client, "m", &request("q", history)).await.unwrap();

    let calls = client.calls();
    let execution = &calls[1];
    // system + 20 turns + execution prompt: nothing truncated or dropped.
    assert_eq!(execution.messages.len(), 22);
    for (i, msg) in execution.messages[1..21].iter().enumerate() {
        assert_eq!(msg.content, format!("turn {i}"));
    }
}

#[tokio::test]
async fn empty_plan_reply_uses_fallback() {
    let client = ScriptedClient::new();
    client.push_text(r#"{"steps": []}"#);
    client.push_text("answer");

    let response = run_chat(&client, "m", &request("q", vec![])).await.unwrap();
    assert_eq!(response.workflow.steps.len(), fallback_plan().steps.len());
    assert_eq!(response.workflow.steps[0].action, "Understanding the request");
}
