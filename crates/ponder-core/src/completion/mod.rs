//! The completion-service interface and its HTTP implementation.
//!
//! The orchestration depends on exactly one outbound operation: pass an
//! ordered role/content message list to a named model and get text back.
//! [`CompletionClient`] captures that contract; [`WorkersAiClient`] is the
//! production implementation against the Cloudflare Workers AI REST API.

pub mod error;
pub mod trait_def;
pub mod workers_ai;

pub use error::CompletionError;
pub use trait_def::{ChatMessage, CompletionClient, Role};
pub use workers_ai::{WorkersAiClient, WorkersAiConfig};
