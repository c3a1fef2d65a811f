//! The `ponder ask` command: run one message through the pipeline from the
//! terminal, with no prior history, and print the plan alongside the
//! answer.

use anyhow::{Context, Result};

use ponder_core::completion::CompletionClient;
use ponder_core::pipeline::run_chat;
use ponder_core::types::ChatRequest;

pub async fn run_ask(client: &dyn CompletionClient, model: &str, message: &str) -> Result<()> {
    let request = ChatRequest {
        message: message.to_string(),
        history: Vec::new(),
    };

    let response = run_chat(client, model, &request)
        .await
        .context("chat pipeline failed")?;

    println!("Plan:");
    for (i, step) in response.workflow.steps.iter().enumerate() {
        println!("  {}. {} -- {}", i + 1, step.action, step.result);
    }
    println!();
    println!("{}", response.response);

    Ok(())
}

#[cfg(test)]
mod tests {
    use ponder_test_utils::ScriptedClient;

    use super::*;

    #[tokio::test]
    async fn ask_runs_both_calls() {
        let client = ScriptedClient::new();
        client.push_text(r#"{"steps": [{"action": "Answer", "reasoning": "Direct question"}]}"#);
        client.push_text("42");

        run_ask(&client, "test-model", "meaning of life?")
            .await
            .unwrap();
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn ask_surfaces_completion_failure() {
        let client = ScriptedClient::new();
        client.push_error("no capacity");

        let result = run_ask(&client, "test-model", "hi").await;
        assert!(result.is_err());
    }
}
