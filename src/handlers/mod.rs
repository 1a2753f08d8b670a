pub mod health_handler;
pub mod manager_handler;
pub mod quiz_handler;

use actix_web::{
    http::{header::LOCATION, StatusCode},
    web, HttpResponse,
};

use crate::views;

/// Registers every route plus the HTML 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(quiz_handler::home)
        .service(quiz_handler::start_quiz)
        .service(quiz_handler::submit_answer)
        .service(quiz_handler::results)
        .service(manager_handler::login_page)
        .service(manager_handler::login)
        .service(manager_handler::logout)
        .service(manager_handler::dashboard)
        .service(manager_handler::manage_questions)
        .service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    views::html_response(StatusCode::NOT_FOUND, views::errors::not_found())
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
