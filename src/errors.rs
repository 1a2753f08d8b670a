use actix_web::{
    http::{header::LOCATION, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::views;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No questions exist")]
    EmptyStore,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::EmptyStore => "EMPTY_STORE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Where the browser is sent instead of an error page, if anywhere.
    fn redirect_target(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthorized(_) => Some("/manager/login"),
            AppError::EmptyStore => Some("/"),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized(_) | AppError::EmptyStore => StatusCode::FOUND,
            AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(target) = self.redirect_target() {
            return HttpResponse::Found()
                .insert_header((LOCATION, target))
                .finish();
        }

        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{} while handling request: {}", self.error_code(), self);
        }

        // Server-side details stay in the log.
        let message = match self {
            AppError::NotFound(_) => "الصفحة غير موجودة".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::InvalidCredentials => "كلمة المرور غير صحيحة!".to_string(),
            _ => "حدث خطأ غير متوقع".to_string(),
        };

        views::html_response(status, views::errors::error_page(status, &message))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<mongodb::bson::document::ValueAccessError> for AppError {
    fn from(err: mongodb::bson::document::ValueAccessError) -> Self {
        AppError::DatabaseError(format!("Unexpected document shape: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DatabaseError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("question 7".into());
        assert_eq!(err.to_string(), "Not found: question 7");
        assert_eq!(AppError::EmptyStore.to_string(), "No questions exist");
    }

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized("manager".into()).error_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/manager/login"
        );
    }

    #[test]
    fn test_empty_store_redirects_home() {
        let response = AppError::EmptyStore.error_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    }

    #[actix_web::test]
    async fn test_internal_errors_do_not_leak_details() {
        let response =
            AppError::DatabaseError("connection refused at 10.0.0.5".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("10.0.0.5"));
    }
}
