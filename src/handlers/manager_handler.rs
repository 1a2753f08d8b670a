use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use maud::Markup;

use super::redirect;
use crate::{
    app_state::AppState,
    auth::ManagerAccess,
    errors::{AppError, AppResult},
    middleware::SessionToken,
    models::dto::request::{LoginForm, ManagerAction, ManagerForm},
    views,
};

const WRONG_PASSWORD: &str = "كلمة المرور غير صحيحة!";

#[get("/manager/login")]
pub async fn login_page() -> Markup {
    views::manager::login(None)
}

#[post("/manager/login")]
pub async fn login(
    state: web::Data<AppState>,
    token: SessionToken,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    match state.manager_auth.verify(&form.password) {
        Ok(()) => {
            state.session_service.grant_manager_access(&token.0).await?;
            log::info!("Manager logged in");
            Ok(redirect("/manager"))
        }
        Err(AppError::InvalidCredentials) => {
            log::warn!("Rejected manager login attempt");
            Ok(views::html_response(
                StatusCode::UNAUTHORIZED,
                views::manager::login(Some(WRONG_PASSWORD)),
            ))
        }
        Err(e) => Err(e),
    }
}

#[get("/manager/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    token: SessionToken,
) -> Result<HttpResponse, AppError> {
    state.session_service.revoke_manager_access(&token.0).await?;
    Ok(redirect("/"))
}

#[get("/manager")]
pub async fn dashboard(
    state: web::Data<AppState>,
    _access: ManagerAccess,
) -> Result<HttpResponse, AppError> {
    let questions = state.question_service.list_ordered().await?;
    Ok(views::html_response(
        StatusCode::OK,
        views::manager::dashboard(&questions, None),
    ))
}

async fn apply_action(state: &AppState, form: &ManagerForm) -> AppResult<()> {
    match form.action() {
        Some(ManagerAction::Add) => {
            state
                .question_service
                .create_question(form.new_question())
                .await?;
        }
        Some(ManagerAction::Delete) => {
            state
                .question_service
                .delete_question(form.question_id()?)
                .await?;
        }
        Some(ManagerAction::Reorder) => {
            state
                .question_service
                .reorder_question(form.question_id()?, form.order()?)
                .await?;
        }
        None => log::warn!("Ignoring unknown manager action '{}'", form.action),
    }
    Ok(())
}

/// Handles the add, delete and reorder forms of the dashboard.
#[post("/manager")]
pub async fn manage_questions(
    state: web::Data<AppState>,
    _access: ManagerAccess,
    form: web::Form<ManagerForm>,
) -> Result<HttpResponse, AppError> {
    match apply_action(&state, &form).await {
        Ok(()) => Ok(redirect("/manager")),
        Err(AppError::ValidationError(message)) => {
            let questions = state.question_service.list_ordered().await?;
            Ok(views::html_response(
                StatusCode::BAD_REQUEST,
                views::manager::dashboard(&questions, Some(&message)),
            ))
        }
        Err(e) => Err(e),
    }
}
