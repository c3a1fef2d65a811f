//! The plan-then-execute pipeline.
//!
//! Strictly sequential: the execution prompt depends on the (possibly
//! fallback) plan, so the two completion calls cannot overlap. Each
//! invocation owns all of its state; concurrent requests never interact.

use tracing::info;

use crate::completion::{CompletionClient, CompletionError};
use crate::compose::compose_response;
use crate::merge::merge_results;
use crate::plan::generate_plan;
use crate::types::{ChatRequest, ChatResponse};

/// Run one chat request through plan generation, response composition, and
/// result merging.
///
/// Fails only on a completion-service failure (from either call); a
/// failure of the second call discards the first call's plan entirely.
pub async fn run_chat(
    client: &dyn CompletionClient,
    model: &str,
    request: &ChatRequest,
) -> Result<ChatResponse, CompletionError> {
    let plan = generate_plan(client, model, &request.message).await?;
    info!(
        steps = plan.steps.len(),
        history_len = request.history.len(),
        "plan generated"
    );

    let answer = compose_response(client, model, &request.history, &request.message, &plan).await?;

    Ok(merge_results(&plan, answer))
}
