//! Generation orchestrator: the two-layer retry state machine.
//!
//! An outer, time-budgeted loop wraps an inner, count-only loop around the
//! text-generation call. The two loops are deliberately independent policies:
//! the outer one checks the wall-clock budget before every attempt and turns
//! exhaustion into a "still processing" outcome; the inner one only backs off
//! exponentially between generation calls. A render failure is fatal and
//! bypasses both loops.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::sleep;

use crate::report::{
    ConsultationRequest, GeneratedReport, RenderError, RenderReport, RenderedDocument,
};

use super::client::TextGenerator;
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::GenerationError;

/// Message returned while the report is still being generated.
pub const STILL_PROCESSING_MESSAGE: &str =
    "Your consultation report is still being generated. Please wait a moment and try again.";

/// One retry loop's parameters. The orchestrator carries two of these.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Wall-clock budget checked before each attempt; `None` for count-only
    /// loops.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    /// Workflow-level policy: 2 attempts, 1s base backoff, budget-checked.
    pub fn workflow(budget: Duration) -> Self {
        RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            deadline: Some(budget),
        }
    }

    /// Generation-call policy: 3 attempts, 2s base backoff, no budget check.
    pub fn generation_call() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            deadline: None,
        }
    }
}

/// Top-level result of one orchestrated generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { download_url: String },
    StillProcessing { message: String },
    Failed { error: String },
}

/// Failure of one outer attempt.
#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Generation(GenerationError),
    #[error(transparent)]
    Render(RenderError),
}

/// Coordinates generation calls and rendering under bounded retries and a
/// wall-clock budget.
pub struct GenerationOrchestrator {
    generator: Arc<dyn TextGenerator>,
    renderer: Arc<dyn RenderReport>,
    inner: RetryPolicy,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, renderer: Arc<dyn RenderReport>) -> Self {
        Self {
            generator,
            renderer,
            inner: RetryPolicy::generation_call(),
        }
    }

    /// Run the full generation pipeline for one request.
    ///
    /// Returns `StillProcessing` when the budget runs out before an attempt
    /// can start; that is a "come back later" signal, not an error.
    pub async fn generate(
        &self,
        request: &ConsultationRequest,
        budget: Duration,
    ) -> GenerationOutcome {
        let policy = RetryPolicy::workflow(budget);
        let started = Instant::now();
        let mut delay = policy.base_delay;
        let mut attempt = 1;

        loop {
            if let Some(limit) = policy.deadline {
                if started.elapsed() > limit {
                    log::warn!(
                        "approaching the {limit:?} generation budget, returning processing status"
                    );
                    return GenerationOutcome::StillProcessing {
                        message: STILL_PROCESSING_MESSAGE.to_string(),
                    };
                }
            }

            match self.generate_once(request).await {
                Ok(document) => {
                    return GenerationOutcome::Success {
                        download_url: document.download_url(),
                    };
                }
                Err(AttemptError::Render(error)) => {
                    // Malformed content will not self-heal; fail right away.
                    log::error!("consultation rendering failed: {error}");
                    return GenerationOutcome::Failed {
                        error: format!("Failed to render consultation report: {error}"),
                    };
                }
                Err(AttemptError::Generation(error)) => {
                    log::error!(
                        "consultation generation failed (attempt {attempt}/{}): {error}",
                        policy.max_attempts
                    );
                    if attempt >= policy.max_attempts {
                        return GenerationOutcome::Failed {
                            error: format!(
                                "Failed to generate consultation after {} attempts: {error}",
                                policy.max_attempts
                            ),
                        };
                    }
                    log::info!(
                        "retrying consultation generation (attempt {}/{})",
                        attempt + 1,
                        policy.max_attempts
                    );
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }

    /// One outer attempt: generation call (with inner retries) then a single
    /// render.
    async fn generate_once(
        &self,
        request: &ConsultationRequest,
    ) -> Result<RenderedDocument, AttemptError> {
        let text = self
            .call_generator(request)
            .await
            .map_err(AttemptError::Generation)?;

        let report = GeneratedReport::new(
            request.consultancy_type.document_title(),
            request.business_name.clone(),
            text,
        );

        self.renderer
            .render(request.consultancy_type, &report)
            .map_err(AttemptError::Render)
    }

    /// The inner, count-only retry loop around the text-generation call.
    async fn call_generator(
        &self,
        request: &ConsultationRequest,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(request);
        let mut delay = self.inner.base_delay;
        let mut attempt = 1;

        loop {
            match self.generator.complete(SYSTEM_PROMPT, &prompt).await {
                Ok(text) => return Ok(text),
                Err(error) => {
                    log::error!(
                        "text-generation call failed (attempt {attempt}/{}): {error}",
                        self.inner.max_attempts
                    );
                    if attempt >= self.inner.max_attempts {
                        log::error!(
                            "all {} text-generation attempts failed",
                            self.inner.max_attempts
                        );
                        return Err(error);
                    }
                    sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }
}
