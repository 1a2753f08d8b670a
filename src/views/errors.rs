use actix_web::http::StatusCode;
use maud::{html, Markup};

use super::layout::page;

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    page(
        status.canonical_reason().unwrap_or("Error"),
        html! {
            article {
                h1 { (status.as_u16()) }
                p.error { (message) }
                a href="/" { "الصفحة الرئيسية" }
            }
        },
    )
}

pub fn not_found() -> Markup {
    error_page(StatusCode::NOT_FOUND, "الصفحة غير موجودة")
}
