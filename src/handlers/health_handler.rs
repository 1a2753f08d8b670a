use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, models::dto::response::HealthResponse};

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::new("healthy"))
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::new("alive"))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    match state.question_service.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new("ready").with_storage("ok")),
        Err(e) => {
            log::warn!("Readiness check failed: {}", e);
            HttpResponse::ServiceUnavailable()
                .json(HealthResponse::new("not_ready").with_storage("error"))
        }
    }
}
