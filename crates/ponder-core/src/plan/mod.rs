//! Plan generation: prompt construction, JSON parsing, and the fixed
//! fallback substituted when the model's planning output is malformed.

pub mod generate;
pub mod parser;
pub mod types;

pub use generate::{PLANNING_SYSTEM_PROMPT, build_planning_prompt, generate_plan};
pub use parser::{PlanParseError, parse_plan};
pub use types::{Plan, PlanStep, fallback_plan};
