mod common;

use std::collections::HashMap;
use std::time::Duration;

use common::{RecordingRenderer, ScriptedGenerator};
use consultancy_server::generation::{GenerationOrchestrator, GenerationOutcome};
use consultancy_server::report::ConsultationRequest;

fn sample_request() -> ConsultationRequest {
    let mut form = HashMap::new();
    form.insert("consultancy_type".to_string(), "strategy".to_string());
    form.insert("business_name".to_string(), "Acme".to_string());
    form.insert("business_type".to_string(), "LLC".to_string());
    form.insert("industry".to_string(), "retail".to_string());
    form.insert("business_size".to_string(), "small".to_string());
    form.insert("focus_strategy".to_string(), "on".to_string());
    ConsultationRequest::from_form(&form)
}

const BUDGET: Duration = Duration::from_secs(25);

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt() {
    let generator = ScriptedGenerator::succeeds("# Summary\nAll good.");
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;

    match outcome {
        GenerationOutcome::Success { download_url } => {
            assert!(download_url.starts_with("/download/strategy_"));
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(generator.call_count(), 1);
    assert_eq!(renderer.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_inner_retries_then_success_renders_once() {
    // Fails inner_max_retries - 1 times, then succeeds within the first
    // outer attempt.
    let generator = ScriptedGenerator::fails_then_succeeds(2, "report text");
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;

    assert!(matches!(outcome, GenerationOutcome::Success { .. }));
    assert_eq!(generator.call_count(), 3);
    assert_eq!(renderer.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_budget_short_circuits() {
    let generator = ScriptedGenerator::succeeds("never used");
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator
        .generate(&sample_request(), Duration::ZERO)
        .await;

    match outcome {
        GenerationOutcome::StillProcessing { message } => {
            assert!(message.contains("still being generated"));
        }
        other => panic!("expected still-processing, got {other:?}"),
    }
    // The generation capability was never invoked.
    assert_eq!(generator.call_count(), 0);
    assert_eq!(renderer.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_both_retry_layers_exhausted() {
    let generator = ScriptedGenerator::always_fails();
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;

    match outcome {
        GenerationOutcome::Failed { error } => {
            assert!(error.contains("after 2 attempts"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    // Two outer attempts, each exhausting the three-call inner loop.
    assert_eq!(generator.call_count(), 6);
    // No artifact is produced for a failed outcome.
    assert_eq!(renderer.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_render_failure_is_not_retried() {
    let generator = ScriptedGenerator::succeeds("valid text");
    let renderer = RecordingRenderer::failing();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;

    match outcome {
        GenerationOutcome::Failed { error } => {
            assert!(error.contains("render"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(generator.call_count(), 1);
    assert_eq!(renderer.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_inner_failure_counts_as_one_outer_attempt() {
    // Three inner failures, then the second outer attempt succeeds on its
    // first inner call.
    let generator = ScriptedGenerator::fails_then_succeeds(3, "recovered");
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;

    assert!(matches!(outcome, GenerationOutcome::Success { .. }));
    assert_eq!(generator.call_count(), 4);
    assert_eq!(renderer.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_spans_both_layers() {
    // 2s and 4s inner backoff, 1s outer backoff, then one more inner failure
    // before the final success.
    let generator = ScriptedGenerator::fails_then_succeeds(4, "late success");
    let renderer = RecordingRenderer::new();
    let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer.clone());

    let outcome = orchestrator.generate(&sample_request(), BUDGET).await;
    assert!(matches!(outcome, GenerationOutcome::Success { .. }));
    assert_eq!(generator.call_count(), 5);
}

