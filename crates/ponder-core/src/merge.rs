//! Result merging: project the plan into step results and attach the
//! answer. Pure and total -- no failure mode.

use crate::plan::Plan;
use crate::types::{ChatResponse, StepResult, Workflow};

/// Literal substituted for a step with no reasoning.
const COMPLETED: &str = "Completed";

/// Merge the plan and the execution answer into the final payload.
///
/// Each step's `reasoning` becomes its `result` (the execution call never
/// reports per-step outcomes; only the original justification is echoed
/// back). Steps with empty reasoning get the literal `"Completed"`. The
/// output always has exactly one result per plan step, in plan order.
pub fn merge_results(plan: &Plan, answer: String) -> ChatResponse {
    let steps = plan
        .steps
        .iter()
        .map(|step| StepResult {
            action: step.action.clone(),
            result: if step.reasoning.is_empty() {
                COMPLETED.to_string()
            } else {
                step.reasoning.clone()
            },
        })
        .collect();

    ChatResponse {
        response: answer,
        workflow: Workflow { steps },
    }
}
