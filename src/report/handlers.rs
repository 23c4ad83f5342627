//! Artifact download and the payment-bypass generation endpoint.

use std::collections::HashMap;

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{error, info};

use crate::payment::handlers::outcome_response;
use crate::report::ConsultationRequest;
use crate::state::AppState;
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Report",
    post,
    path = "/generate-report",
    responses(
        (status = 200, description = "Report generated"),
        (status = 202, description = "Report still being generated"),
        (status = 402, description = "Payment required", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_report(
    form: web::Form<HashMap<String, String>>,
    data: web::Data<AppState>,
) -> impl Responder {
    if !data.config.bypass_payment {
        return HttpResponse::PaymentRequired()
            .json(ErrorResponse::new("PaymentRequired", "Payment required"));
    }

    let request = ConsultationRequest::from_form(&form);
    info!(
        "Payment bypass active, generating {:?} report directly",
        request.consultancy_type
    );

    let outcome = data
        .orchestrator
        .generate(&request, data.config.generation_budget)
        .await;
    outcome_response(outcome)
}

#[utoipa::path(
    tag = "Report",
    get,
    path = "/download/{filename}",
    responses(
        (status = 200, description = "Stored artifact returned as an attachment"),
        (status = 404, description = "No artifact with that filename", body = ErrorResponse)
    ),
    params(
        ("filename" = String, Path, description = "Artifact filename from a successful generation")
    )
)]
pub async fn download_report(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let filename = sanitize_filename::sanitize(path.into_inner());
    let full_path = data.config.download_dir.join(&filename);

    if !full_path.is_file() {
        error!("Artifact not found for download: {filename}");
        return HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
            "Report '{filename}' not found"
        )));
    }

    match NamedFile::open(&full_path) {
        Ok(file) => file
            .set_content_disposition(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename)],
            })
            .into_response(&req),
        Err(e) => {
            error!("Failed to open artifact '{filename}': {e}");
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                "Failed to read stored report",
            ))
        }
    }
}
