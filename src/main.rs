use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use smaak_algo::config::Settings;
use smaak_algo::routes::{self, AppState};
use smaak_algo::services::{DirectoryClient, GeocoderClient, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error as log_error};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Smaak Algo discovery service...");
    info!("Configuration loaded successfully");

    // Initialize geocoder client
    let geocoder = Arc::new(GeocoderClient::new(
        settings.geocoder.endpoint.clone(),
        settings.geocoder.api_key.clone(),
    ));

    info!("Geocoder client initialized");

    // Initialize directory client
    let directory = Arc::new(DirectoryClient::new(
        settings.directory.endpoint.clone(),
        settings.directory.api_key.clone(),
        settings.directory.restaurants_table.clone(),
    ));

    if let Err(e) = directory.health_check().await {
        log_error!("Directory health check failed ({}), continuing degraded", e);
    }

    info!("Directory client initialized");

    // Initialize form-session store
    let sessions = Arc::new(SessionStore::new(
        settings.session.capacity,
        settings.session.ttl_secs,
        Arc::clone(&geocoder),
        Arc::clone(&directory),
        Duration::from_millis(settings.validation.address_debounce_ms),
        Duration::from_millis(settings.validation.name_debounce_ms),
    ));

    info!(
        "Session store initialized (capacity: {}, TTL: {}s, address debounce: {}ms, name debounce: {}ms)",
        settings.session.capacity,
        settings.session.ttl_secs,
        settings.validation.address_debounce_ms,
        settings.validation.name_debounce_ms
    );

    // Build application state
    let app_state = AppState {
        directory,
        geocoder,
        sessions,
        jwt_secret: settings.auth.jwt_secret.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
