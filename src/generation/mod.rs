//! Generation module - the retry-governed path from a consultation request to
//! a rendered report.
//!
//! Submodules:
//! - `client` - the text-generation capability behind a trait
//! - `prompt` - the fixed consultation prompt template
//! - `orchestrator` - two-layer retry state machine producing a
//!   [`orchestrator::GenerationOutcome`]

pub mod client;
pub mod orchestrator;
pub mod prompt;

pub use client::{OpenAiTextGenerator, TextGenerator};
pub use orchestrator::{GenerationOrchestrator, GenerationOutcome, RetryPolicy};

use std::time::Duration;
use thiserror::Error;

/// Transient failure from the text-generation capability. Retried by the
/// orchestrator's inner loop, then propagated.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text-generation API call failed: {0}")]
    Api(#[from] async_openai::error::OpenAIError),
    #[error("text-generation call timed out after {0:?}")]
    Timeout(Duration),
    #[error("text-generation response contained no content")]
    EmptyResponse,
}
