//! Plan JSON parser.
//!
//! Parses the planning call's raw text into a [`Plan`]. Any deserialization
//! error, missing `steps` key, or empty step list is a parse failure; the
//! caller substitutes the fallback plan rather than propagating it.

use thiserror::Error;

use super::types::Plan;

/// Errors from parsing a planning reply. These never reach the caller of
/// the pipeline; they exist so the fallback branch is a tagged result
/// rather than control flow by panic.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("planning reply is not a valid plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("planning reply contains no steps")]
    EmptyPlan,
}

/// Parse a raw planning reply into a [`Plan`].
///
/// The reply must be a JSON object of shape
/// `{"steps": [{"action": ..., "reasoning": ...}, ...]}` with at least one
/// step. Refusal prose, malformed JSON, and shape mismatches all collapse
/// into the same failure branch.
pub fn parse_plan(raw: &str) -> Result<Plan, PlanParseError> {
    let plan: Plan = serde_json::from_str(raw)?;
    if plan.steps.is_empty() {
        return Err(PlanParseError::EmptyPlan);
    }
    Ok(plan)
}
