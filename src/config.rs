//! Application configuration.
//!
//! Everything the collaborating services need is read from the environment
//! once at startup and passed down explicitly; there is no process-wide
//! mutable state.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Overall wall-clock budget for one payment-gated generation, chosen to stay
/// under the platform's ~30 second request ceiling.
pub const GENERATION_BUDGET: Duration = Duration::from_secs(25);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Base URL used to build the checkout success/cancel redirects.
    pub public_base_url: String,
    pub stripe_secret_key: String,
    pub stripe_publishable_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub download_dir: PathBuf,
    /// When set, POST /api/generate-report skips payment verification.
    pub bypass_payment: bool,
    pub generation_budget: Duration,
}

impl AppConfig {
    /// Read configuration from the environment (after loading `.env`).
    ///
    /// Missing provider keys produce warnings, not startup failures: the
    /// affected endpoints will report errors when exercised.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY").unwrap_or_default();
        if stripe_secret_key.is_empty() {
            log::warn!("Stripe API key not set. Stripe functionality will not work.");
        }
        let stripe_publishable_key = env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default();
        if stripe_publishable_key.is_empty() {
            log::warn!("Stripe publishable key not set. Stripe checkout will not work.");
        }
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if openai_api_key.is_empty() {
            log::warn!("OpenAI API key not set. Report generation will not work.");
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        AppConfig {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            stripe_secret_key,
            stripe_publishable_key,
            openai_api_key,
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4-turbo-preview".to_string()),
            download_dir: env::var("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/downloads")),
            bypass_payment: env::var("BYPASS_PAYMENT")
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            generation_budget: GENERATION_BUDGET,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
            stripe_secret_key: String::new(),
            stripe_publishable_key: String::new(),
            openai_api_key: String::new(),
            openai_model: "gpt-4-turbo-preview".to_string(),
            download_dir: PathBuf::from("static/downloads"),
            bypass_payment: false,
            generation_budget: GENERATION_BUDGET,
        }
    }
}
