// HTTP surface: every endpoint lives under /api/v1
pub mod matches;

use actix_web::{web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

pub const API_PREFIX: &str = "/api/v1";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(API_PREFIX).configure(matches::configure));
}

/// JSON 404 for anything outside the registered routes
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not found".to_string(),
        message: format!("no route for {} {}", req.method(), req.path()),
        status_code: 404,
    })
}
