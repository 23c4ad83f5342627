//! Health probe for both external collaborators.

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub stripe: String,
    pub openai: String,
}

#[derive(Serialize, ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
    pub timestamp: String,
}

#[utoipa::path(
    tag = "Health",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Both collaborators reachable", body = HealthResponse),
        (status = 500, description = "Payment provider unreachable", body = UnhealthyResponse)
    )
)]
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let timestamp = chrono::Utc::now().to_rfc3339();

    if let Err(e) = data.payment.health_check().await {
        return HttpResponse::InternalServerError().json(UnhealthyResponse {
            status: "unhealthy".to_string(),
            error: e.to_string(),
            timestamp,
        });
    }

    let openai = match data.generator.health_check().await {
        Ok(status) => status,
        Err(e) => format!("error: {e}"),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        stripe: "ok".to_string(),
        openai,
    })
}
