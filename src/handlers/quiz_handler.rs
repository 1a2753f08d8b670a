use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use maud::Markup;

use super::redirect;
use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::SessionToken,
    models::dto::request::AnswerForm,
    services::{
        quiz_session_service::{QuizSessionService, QuizStep},
        result_scorer::ResultScorer,
    },
    views,
};

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> Result<Markup, AppError> {
    let total = state.question_service.count().await?;
    Ok(views::quiz::home(&state.config.recipient_name, total))
}

/// Starts (or restarts) the quiz for this client and shows the first question.
#[get("/quiz")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    token: SessionToken,
) -> Result<HttpResponse, AppError> {
    let questions = state.question_service.list_ordered().await?;
    if questions.is_empty() {
        return Err(AppError::EmptyStore);
    }

    let mut session = state.session_service.load(&token.0).await?;
    QuizSessionService::start(&mut session);
    state.session_service.save(&token.0, &session).await?;

    match QuizSessionService::current_question(&session, &questions) {
        QuizStep::Question(current) => Ok(views::html_response(
            StatusCode::OK,
            views::quiz::question(&current, None),
        )),
        QuizStep::NoQuestions | QuizStep::Completed => Err(AppError::EmptyStore),
    }
}

#[post("/quiz")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    token: SessionToken,
    form: web::Form<AnswerForm>,
) -> Result<HttpResponse, AppError> {
    let questions = state.question_service.list_ordered().await?;
    let mut session = state.session_service.load(&token.0).await?;

    let step = QuizSessionService::submit_answer(
        &mut session,
        &questions,
        form.question_id.as_deref(),
        form.answer.as_deref(),
    );

    match step {
        Ok(QuizStep::Question(next)) => {
            state.session_service.save(&token.0, &session).await?;
            Ok(views::html_response(
                StatusCode::OK,
                views::quiz::question(&next, None),
            ))
        }
        Ok(QuizStep::Completed) => {
            state.session_service.save(&token.0, &session).await?;
            Ok(redirect("/results"))
        }
        Ok(QuizStep::NoQuestions) => Err(AppError::EmptyStore),
        Err(AppError::ValidationError(message)) => {
            log::debug!("Rejected answer: {}", message);
            match QuizSessionService::current_question(&session, &questions) {
                QuizStep::Question(current) => Ok(views::html_response(
                    StatusCode::BAD_REQUEST,
                    views::quiz::question(&current, Some(&message)),
                )),
                _ => Err(AppError::ValidationError(message)),
            }
        }
        Err(e) => Err(e),
    }
}

/// Scores the finished attempt, then clears the session.
#[get("/results")]
pub async fn results(
    state: web::Data<AppState>,
    token: SessionToken,
) -> Result<HttpResponse, AppError> {
    let total = state.question_service.count().await?;
    if total == 0 {
        return Err(AppError::EmptyStore);
    }

    let session = state.session_service.load(&token.0).await?;
    let result = ResultScorer::score(session.score, total);
    state.session_service.flush(&token.0).await?;

    log::info!(
        "Quiz finished with {}/{} ({:?})",
        result.score,
        result.total,
        result.band
    );
    Ok(views::html_response(
        StatusCode::OK,
        views::quiz::results(&result),
    ))
}
