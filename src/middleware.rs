use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::errors::AppError;

/// Opaque per-client key under which session state is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Makes sure every request carries a [`SessionToken`], minting one (and
/// setting the cookie) when the client has none or sent a malformed one.
pub struct SessionMiddleware {
    cookie_name: Rc<str>,
    secure: bool,
}

impl SessionMiddleware {
    pub fn new(cookie_name: &str, secure: bool) -> Self {
        Self {
            cookie_name: Rc::from(cookie_name),
            secure,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            cookie_name: Rc::clone(&self.cookie_name),
            secure: self.secure,
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
    secure: bool,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(&self.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|value| Uuid::parse_str(value).is_ok());

        let (token, is_new) = match existing {
            Some(token) => (token, false),
            None => (Uuid::new_v4().to_string(), true),
        };
        req.extensions_mut().insert(SessionToken(token.clone()));

        let service = Rc::clone(&self.service);
        let cookie_name = self.cookie_name.to_string();
        let secure = self.secure;

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if is_new {
                let cookie = Cookie::build(cookie_name, token)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(secure)
                    .finish();
                res.response_mut()
                    .add_cookie(&cookie)
                    .map_err(ErrorInternalServerError)?;
            }

            Ok(res)
        })
    }
}

impl FromRequest for SessionToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req.extensions().get::<SessionToken>().cloned().ok_or_else(|| {
            AppError::InternalError("session middleware is not installed".to_string())
        });

        ready(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, App, HttpResponse};

    #[get("/token")]
    async fn echo_token(token: SessionToken) -> HttpResponse {
        HttpResponse::Ok().body(token.0)
    }

    #[actix_web::test]
    async fn test_new_client_gets_a_cookie() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new("quiz_session", false))
                .service(echo_token),
        )
        .await;

        let req = test::TestRequest::get().uri("/token").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "quiz_session")
            .expect("session cookie should be set");
        assert!(Uuid::parse_str(cookie.value()).is_ok());
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[actix_web::test]
    async fn test_existing_cookie_is_reused() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new("quiz_session", false))
                .service(echo_token),
        )
        .await;

        let token = Uuid::new_v4().to_string();
        let req = test::TestRequest::get()
            .uri("/token")
            .cookie(Cookie::new("quiz_session", token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.response().cookies().count(), 0);
        let body = test::read_body(resp).await;
        assert_eq!(body, token.as_bytes());
    }

    #[actix_web::test]
    async fn test_malformed_cookie_is_replaced() {
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new("quiz_session", false))
                .service(echo_token),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/token")
            .cookie(Cookie::new("quiz_session", "../../etc/passwd"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "quiz_session")
            .expect("a fresh cookie should be issued");
        assert!(Uuid::parse_str(cookie.value()).is_ok());
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware_fails() {
        let app = test::init_service(App::new().service(echo_token)).await;

        let req = test::TestRequest::get().uri("/token").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_server_error());
    }
}
