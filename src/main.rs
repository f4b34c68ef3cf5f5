use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use inclusive_match::config::Settings;
use inclusive_match::core::ScoringModel;
use inclusive_match::models::ErrorResponse;
use inclusive_match::routes::{self, matches::AppState};
use inclusive_match::services::{CsvEmployerDirectory, EmployerSource, LinearModel};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors, including unknown option labels
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_failure(what: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("Failed to load {}: {}", what, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration; fall back to env-only logging settings until it parses
    let settings = Settings::load();
    let (log_level, log_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => (
            std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
        ),
    };
    init_logging(&log_level, &log_format);

    info!("Starting Inclusive Match service...");

    let settings = settings.map_err(|e| startup_failure("configuration", e))?;
    let matcher = settings
        .matching
        .matcher()
        .map_err(|e| startup_failure("matching settings", e))?;

    info!("Configuration loaded successfully");

    // Employer directory and model are loaded once and shared read-only
    let directory = CsvEmployerDirectory::load(&settings.data.employers_path)
        .map_err(|e| startup_failure("employer directory", e))?;
    info!(
        "Loaded {} employers from {}",
        directory.len(),
        settings.data.employers_path.display()
    );

    let model = LinearModel::load(&settings.data.model_path)
        .map_err(|e| startup_failure("scoring model", e))?;
    info!(
        "Loaded scoring model {} (schema {})",
        settings.data.model_path.display(),
        model.schema().version
    );

    info!("Matcher initialized with policy: {:?}", matcher.policy());

    let app_state = AppState {
        directory: Arc::new(directory),
        model: Arc::new(model),
        matcher,
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
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::route().to(routes::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
