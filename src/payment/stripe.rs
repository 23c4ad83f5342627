//! Stripe REST client.
//!
//! Talks to the Checkout Sessions API with form-encoded requests over the
//! shared reqwest client. Only the three calls this service needs are
//! implemented: create a session, retrieve a session, and an account probe
//! for the health endpoint.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::PaymentError;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Inputs for creating a checkout session.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub product_name: String,
    pub product_description: String,
    pub unit_amount_cents: u64,
    pub success_url: String,
    pub cancel_url: String,
    /// Carried through the payment redirect round trip; this is where the
    /// serialized consultation form lives.
    pub metadata: HashMap<String, String>,
}

/// A retrieved checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct CreatedSession {
    id: String,
}

/// Payment capability seam; the workflow handlers only see this trait.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_session(&self, params: CreateSessionParams) -> Result<String, PaymentError>;
    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, PaymentError>;
    async fn health_check(&self) -> Result<(), PaymentError>;
}

pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(http: reqwest::Client, secret_key: String) -> Self {
        Self {
            http,
            secret_key,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host, for tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Flatten session params into Stripe's bracketed form encoding.
    fn session_form(params: &CreateSessionParams) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            (
                "line_items[0][price_data][currency]".to_string(),
                "usd".to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                params.unit_amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                params.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".to_string(),
                params.product_description.clone(),
            ),
            ("success_url".to_string(), params.success_url.clone()),
            ("cancel_url".to_string(), params.cancel_url.clone()),
        ];
        for (key, value) in &params.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }
        form
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PaymentError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(PaymentError::Provider {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_session(&self, params: CreateSessionParams) -> Result<String, PaymentError> {
        let form = Self::session_form(&params);
        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let created: CreatedSession = Self::check_status(response).await?.json().await?;
        Ok(created.id)
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{session_id}",
                self.api_base
            ))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let session = Self::check_status(response).await?.json().await?;
        Ok(session)
    }

    async fn health_check(&self) -> Result<(), PaymentError> {
        let response = self
            .http
            .get(format!("{}/v1/account", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
