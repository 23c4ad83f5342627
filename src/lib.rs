use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod generation;
pub mod health;
pub mod payment;
pub mod report;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Route table, shared between `run()` and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/create-checkout-session")
                    .route(web::post().to(payment::handlers::create_checkout_session)),
            )
            .service(
                web::resource("/payment-success")
                    .route(web::get().to(payment::handlers::payment_success)),
            )
            .service(
                web::resource("/generate-report")
                    .route(web::post().to(report::handlers::generate_report)),
            ),
    )
    .service(web::resource("/health").route(web::get().to(health::health_check)))
    .service(
        web::resource("/download/{filename}")
            .route(web::get().to(report::handlers::download_report)),
    );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::payment::handlers::create_checkout_session,
            crate::payment::handlers::payment_success,
            crate::report::handlers::generate_report,
            crate::report::handlers::download_report,
            crate::health::health_check
        ),
        components(
            schemas(
                report::models::ConsultancyType,
                report::models::FocusArea,
                report::models::ConsultationRequest,
                payment::handlers::CheckoutSessionResponse,
                payment::handlers::ReportReadyResponse,
                payment::handlers::ProcessingResponse,
                health::HealthResponse,
                health::UnhealthyResponse,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Payment", description = "Checkout creation and the payment-gated report workflow."),
            (name = "Report", description = "Report generation and artifact download."),
            (name = "Health", description = "Collaborator reachability probe.")
        )
    )]
    struct ApiDoc;

    let config = AppConfig::from_env();
    std::fs::create_dir_all(&config.download_dir)?;

    let bind = (config.bind_addr.clone(), config.port);
    let app_state = web::Data::new(AppState::new(config));

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind)?
    .run()
    .await
}
