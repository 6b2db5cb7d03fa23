use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

/// GET / - liveness text
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = String)
    )
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().body("server is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = state.store.ping().await;

    let response = HealthResponse {
        status: if database.is_ok() { "healthy" } else { "degraded" }.to_string(),
        service: "salon-booking-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: match &database {
            Ok(()) => "up".to_string(),
            Err(e) => {
                log::error!("❌ Health check database ping failed: {}", e);
                "down".to_string()
            }
        },
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
