use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::{app_state::AppState, errors::AppError, middleware::SessionToken};

/// Guard for manager-only handlers. Rejects with
/// [`AppError::Unauthorized`], which redirects to the login page.
#[derive(Debug)]
pub struct ManagerAccess;

impl FromRequest for ManagerAccess {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.extensions().get::<SessionToken>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token.ok_or_else(|| {
                AppError::InternalError("session middleware is not installed".to_string())
            })?;
            let state = state
                .ok_or_else(|| AppError::InternalError("application state missing".to_string()))?;

            let session = state.session_service.load(&token.0).await?;
            if !session.manager_access {
                log::info!("Manager page requested without access, redirecting to login");
                return Err(AppError::Unauthorized("manager login required".to_string()));
            }

            Ok(ManagerAccess)
        })
    }
}
