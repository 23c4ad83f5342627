//! Payment module - checkout session creation and the payment-gated workflow.

pub mod handlers;
pub mod stripe;

pub use stripe::{CheckoutSession, CreateSessionParams, PaymentProvider, StripeClient};

use thiserror::Error;

/// Payment verification failures. Surfaced to the caller as a 4xx and never
/// retried.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("payment provider returned status {status}: {detail}")]
    Provider { status: u16, detail: String },
    #[error("checkout session is not paid (status: {0})")]
    NotPaid(String),
}
