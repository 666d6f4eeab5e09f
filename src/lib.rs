use std::collections::BTreeMap;

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod drafts;
pub mod layout;
pub mod letters;
pub mod models;
pub mod render;
pub mod state;
pub mod table;

pub use crate::config::PortalConfig;
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field messages, present on validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            fields: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn validation(message: &str, fields: BTreeMap<String, String>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::new("ValidationError", message)
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::letters::handlers::list_letter_types,
        crate::letters::handlers::generate_faculty_request,
        crate::letters::handlers::generate_event_approval,
        crate::letters::handlers::parse_table,
        crate::drafts::handlers::create_draft,
        crate::drafts::handlers::get_draft,
        crate::drafts::handlers::edit_draft,
        crate::drafts::handlers::reset_draft,
        crate::drafts::handlers::generate_draft,
        crate::drafts::handlers::delete_draft
    ),
    components(
        schemas(
            models::LetterKind,
            models::LetterField,
            models::LetterForm,
            models::FacultyRequestForm,
            models::EventApprovalForm,
            models::ParticularEntry,
            table::TableGrid,
            letters::FormEdit,
            letters::handlers::LetterTypeInfo,
            letters::handlers::FieldInfo,
            letters::handlers::ParseTableRequest,
            letters::handlers::ParseTableResponse,
            drafts::DraftView,
            drafts::handlers::CreateDraftRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Letters", description = "Letter catalog, one-shot PDF generation and table parsing."),
        (name = "Drafts", description = "Server-side form drafts with snapshot edits.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local server")
    )
)]
pub struct ApiDoc;

/// Registers every `/api` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(letters::handlers::config)
            .configure(drafts::handlers::config),
    );
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match PortalConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let app_state = web::Data::new(AppState::new(&config));

    let prometheus = PrometheusMetricsBuilder::new("letter_portal")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let (host, port) = config.bind_address();
    log::info!("Starting server at http://{}:{}", host, port);

    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((host.as_str(), port))?
    .run()
    .await
}
