//! Plan data types and the fixed fallback plan.

use serde::{Deserialize, Serialize};

/// One unit of the model's plan. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Short step description; the only part shown to the model during
    /// execution.
    pub action: String,
    /// Justification for the step. Omitted from the execution prompt, but
    /// re-surfaced to the caller as each step's `result`.
    #[serde(default)]
    pub reasoning: String,
}

/// Ordered plan produced by the planning call (or the fallback). Owned by
/// one orchestration run; steps are never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

/// The fixed three-step plan substituted when the planning output cannot
/// be parsed. Deterministic: identical on every failure.
pub fn fallback_plan() -> Plan {
    Plan {
        steps: vec![
            PlanStep {
                action: "Understanding the request".to_string(),
                reasoning: "Analyzing user input".to_string(),
            },
            PlanStep {
                action: "Gathering information".to_string(),
                reasoning: "Collecting relevant context".to_string(),
            },
            PlanStep {
                action: "Formulating response".to_string(),
                reasoning: "Creating comprehensive answer".to_string(),
            },
        ],
    }
}
