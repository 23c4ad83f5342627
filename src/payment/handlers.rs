//! Checkout creation and the payment-gated generation workflow.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::generation::GenerationOutcome;
use crate::report::ConsultationRequest;
use crate::state::AppState;
use crate::ErrorResponse;

/// Price of one consultation report, in cents.
const REPORT_PRICE_CENTS: u64 = 1999;

#[derive(Serialize, ToSchema)]
pub struct CheckoutSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReportReadyResponse {
    pub success: bool,
    pub download_url: String,
}

#[derive(Serialize, ToSchema)]
pub struct ProcessingResponse {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize, IntoParams)]
pub struct PaymentSuccessQuery {
    pub session_id: String,
}

/// Translate an orchestrator outcome into the HTTP response for it.
pub fn outcome_response(outcome: GenerationOutcome) -> HttpResponse {
    match outcome {
        GenerationOutcome::Success { download_url } => {
            HttpResponse::Ok().json(ReportReadyResponse {
                success: true,
                download_url,
            })
        }
        GenerationOutcome::StillProcessing { message } => {
            HttpResponse::Accepted().json(ProcessingResponse {
                status: "processing".to_string(),
                message,
            })
        }
        GenerationOutcome::Failed { error } => {
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&error))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Payment",
    post,
    path = "/create-checkout-session",
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutSessionResponse),
        (status = 400, description = "Payment provider rejected the request", body = ErrorResponse)
    )
)]
pub async fn create_checkout_session(
    form: web::Form<HashMap<String, String>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let form = form.into_inner();
    let consultancy_type = crate::report::ConsultancyType::from_form_value(
        form.get("consultancy_type").map(String::as_str).unwrap_or(""),
    );

    let form_json = match serde_json::to_string(&form) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize form data for checkout metadata: {e}");
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("Invalid form submission"));
        }
    };

    let mut metadata = HashMap::new();
    metadata.insert("form_data".to_string(), form_json);

    let params = crate::payment::CreateSessionParams {
        product_name: format!("AI Consultancy: {}", consultancy_type.checkout_label()),
        product_description: "AI-powered business consultation tailored to your needs".to_string(),
        unit_amount_cents: REPORT_PRICE_CENTS,
        success_url: format!(
            "{}/payment-return?session_id={{CHECKOUT_SESSION_ID}}",
            data.config.public_base_url
        ),
        cancel_url: format!("{}/", data.config.public_base_url),
        metadata,
    };

    match data.payment.create_session(params).await {
        Ok(session_id) => {
            info!("Created checkout session {session_id} for {consultancy_type:?}");
            HttpResponse::Ok().json(CheckoutSessionResponse { session_id })
        }
        Err(e) => {
            error!("Stripe error: {e}");
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Payment",
    get,
    path = "/payment-success",
    params(PaymentSuccessQuery),
    responses(
        (status = 200, description = "Report generated", body = ReportReadyResponse),
        (status = 202, description = "Report still being generated", body = ProcessingResponse),
        (status = 400, description = "Payment verification failed", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn payment_success(
    query: web::Query<PaymentSuccessQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let session = match data.payment.retrieve_session(&query.session_id).await {
        Ok(session) => session,
        Err(e) => {
            error!("Stripe error: {e}");
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
                "Payment verification failed: {e}"
            )));
        }
    };

    if session.payment_status != "paid" {
        warn!(
            "Checkout session {} is not paid (status: {})",
            session.id, session.payment_status
        );
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
            "Payment verification failed: {}",
            crate::payment::PaymentError::NotPaid(session.payment_status)
        )));
    }

    // The form snapshot made the redirect round trip inside session metadata.
    // Missing or malformed metadata degrades to an empty form, never a crash.
    let form: HashMap<String, String> = session
        .metadata
        .get("form_data")
        .and_then(|raw| {
            serde_json::from_str(raw)
                .map_err(|e| warn!("Unreadable form_data metadata on {}: {e}", session.id))
                .ok()
        })
        .unwrap_or_default();

    let request = ConsultationRequest::from_form(&form);
    info!(
        "Payment verified for session {}, generating {:?} report",
        session.id, request.consultancy_type
    );

    let outcome = data
        .orchestrator
        .generate(&request, data.config.generation_budget)
        .await;
    outcome_response(outcome)
}
