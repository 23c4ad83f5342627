//! Shared application state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::generation::{GenerationOrchestrator, OpenAiTextGenerator, TextGenerator};
use crate::payment::{PaymentProvider, StripeClient};
use crate::report::{RenderReport, TypstReportRenderer};

pub struct AppState {
    pub config: AppConfig,
    pub payment: Arc<dyn PaymentProvider>,
    pub generator: Arc<dyn TextGenerator>,
    pub orchestrator: GenerationOrchestrator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("consultancy-server/1.0")
            .build()
            .expect("Failed to create reqwest client");

        let payment: Arc<dyn PaymentProvider> = Arc::new(StripeClient::new(
            http_client,
            config.stripe_secret_key.clone(),
        ));
        let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiTextGenerator::new(
            &config.openai_api_key,
            &config.openai_model,
        ));
        let renderer: Arc<dyn RenderReport> =
            Arc::new(TypstReportRenderer::new(config.download_dir.clone()));

        Self::new_with_collaborators(config, payment, generator, renderer)
    }

    /// Assemble state around injected collaborators; the seam the tests use.
    pub fn new_with_collaborators(
        config: AppConfig,
        payment: Arc<dyn PaymentProvider>,
        generator: Arc<dyn TextGenerator>,
        renderer: Arc<dyn RenderReport>,
    ) -> Self {
        let orchestrator = GenerationOrchestrator::new(generator.clone(), renderer);
        AppState {
            config,
            payment,
            generator,
            orchestrator,
        }
    }
}
