pub mod airlines;
pub mod auth;
pub mod flights;
pub mod hotels;
pub mod locations;
pub mod viewpoints;

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers the whole `/api` surface. Shared between `main` and the
/// integration tests so both run the exact same app.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    auth::routes(cfg);
    locations::routes(cfg);
    viewpoints::routes(cfg);
    hotels::routes(cfg);
    flights::routes(cfg);
    airlines::routes(cfg);
}
