//! Core orchestration for ponder: plan, execute, merge.
//!
//! A chat request flows through three sequential stages, all sharing one
//! [`completion::CompletionClient`]:
//!
//! ```text
//! ChatRequest
//!     |
//!     v
//! plan::generate_plan ----complete()---> Plan (or fixed fallback)
//!     |
//!     v
//! compose::compose_response --complete()--> answer text
//!     |
//!     v
//! merge::merge_results -> ChatResponse { response, workflow }
//! ```
//!
//! The completion service is abstracted behind the narrow
//! [`completion::CompletionClient`] trait so the whole pipeline runs
//! against a scripted substitute in tests.

pub mod completion;
pub mod compose;
pub mod merge;
pub mod pipeline;
pub mod plan;
pub mod types;

pub use completion::{ChatMessage, CompletionClient, CompletionError, Role};
pub use pipeline::run_chat;
pub use types::{ChatRequest, ChatResponse, HistoryEntry, StepResult, Workflow};
