//! Text-generation capability.
//!
//! The orchestrator only sees the [`TextGenerator`] trait; the OpenAI-backed
//! implementation lives here with its per-call timeout and output-length cap.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tokio::time::timeout;

use super::GenerationError;

/// Per-call timeout for a single generation request.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(30);
/// Output-length cap per generation call.
pub const MAX_COMPLETION_TOKENS: u32 = 4000;
/// Timeout used by the health probe's model listing.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opaque text-generation capability: submit a prompt, receive text, may fail
/// or time out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One generation call with the configured timeout and length cap.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;

    /// Reachability probe; returns a short status string on success.
    async fn health_check(&self) -> Result<String, GenerationError>;
}

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTextGenerator {
    pub fn new(api_key: &str, model: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(system)
            .build()?;
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_message),
                ChatCompletionRequestMessage::User(user_message),
            ])
            .max_tokens(MAX_COMPLETION_TOKENS)
            .build()?;

        let response = timeout(CALL_TIMEOUT, self.client.chat().create(request))
            .await
            .map_err(|_| GenerationError::Timeout(CALL_TIMEOUT))??;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }

    async fn health_check(&self) -> Result<String, GenerationError> {
        let models = timeout(PROBE_TIMEOUT, self.client.models().list())
            .await
            .map_err(|_| GenerationError::Timeout(PROBE_TIMEOUT))??;

        let available = models.data.iter().any(|model| model.id == self.model);
        if available {
            Ok("ok".to_string())
        } else {
            Ok(format!("warning: {} not available", self.model))
        }
    }
}
