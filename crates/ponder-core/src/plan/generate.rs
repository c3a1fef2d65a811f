//! Plan generation: prompt construction plus the planning completion call.
//!
//! [`generate_plan`] makes exactly one completion call. A malformed reply
//! is final -- it is replaced by [`super::fallback_plan`], never
//! re-requested, and the substitution is invisible to the caller. Only a
//! completion-service failure propagates.

use tracing::debug;

use crate::completion::{ChatMessage, CompletionClient, CompletionError};

use super::parser::parse_plan;
use super::types::{Plan, fallback_plan};

/// System instruction for the planning call: constrain the model to emit
/// only valid JSON.
pub const PLANNING_SYSTEM_PROMPT: &str =
    "You are a planning assistant. Always respond with valid JSON only.";

/// Build the planning prompt for a user message.
///
/// States the request text verbatim so the model's plan is keyed to it,
/// and spells out the expected JSON shape.
pub fn build_planning_prompt(message: &str) -> String {
    format!(
        r#"Analyze this user request and break it down into 3-5 clear steps needed to answer it well. Be specific.

User request: "{message}"

Provide a JSON response with this structure:
{{
  "steps": [
    {{"action": "Brief step description", "reasoning": "Why this step is needed"}}
  ]
}}"#
    )
}

/// Generate a plan for `message` via one planning completion.
///
/// Parse failures are absorbed here: any reply that is not a well-formed,
/// non-empty plan yields the fixed fallback plan, so downstream stages
/// always receive a valid plan. Completion-service failures propagate.
pub async fn generate_plan(
    client: &dyn CompletionClient,
    model: &str,
    message: &str,
) -> Result<Plan, CompletionError> {
    let messages = [
        ChatMessage::system(PLANNING_SYSTEM_PROMPT),
        ChatMessage::user(build_planning_prompt(message)),
    ];

    let raw = client.complete(model, &messages).await?;

    match parse_plan(&raw) {
        Ok(plan) => Ok(plan),
        Err(e) => {
            debug!(error = %e, "planning reply unparseable, using fallback plan");
            Ok(fallback_plan())
        }
    }
}
