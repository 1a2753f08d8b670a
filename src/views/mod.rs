pub mod errors;
pub mod layout;
pub mod manager;
pub mod quiz;

use actix_web::{http::StatusCode, HttpResponse};
use maud::Markup;

/// Wraps a rendered page in a response with an explicit status.
pub fn html_response(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}
