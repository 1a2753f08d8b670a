use std::sync::Arc;

use crate::{
    auth::ManagerAuth,
    config::{Config, StorageBackend},
    db::Database,
    errors::AppResult,
    repositories::{
        InMemoryQuestionRepository, InMemorySessionRepository, MongoQuestionRepository,
        MongoSessionRepository, QuestionRepository, SessionRepository,
    },
    services::{question_service::QuestionService, session_service::SessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub session_service: Arc<SessionService>,
    pub manager_auth: Arc<ManagerAuth>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let ttl = config.session_ttl();
        let (questions, sessions): (Arc<dyn QuestionRepository>, Arc<dyn SessionRepository>) =
            match config.storage_backend {
                StorageBackend::Mongo => {
                    let db = Database::connect(&config).await?;
                    (
                        Arc::new(MongoQuestionRepository::new(&db)),
                        Arc::new(MongoSessionRepository::new(&db, ttl)),
                    )
                }
                StorageBackend::Memory => (
                    Arc::new(InMemoryQuestionRepository::new()),
                    Arc::new(InMemorySessionRepository::with_ttl(ttl)),
                ),
            };

        questions.ensure_indexes().await?;
        sessions.ensure_indexes().await?;

        Ok(Self::with_repositories(config, questions, sessions))
    }

    pub fn with_repositories(
        config: Config,
        questions: Arc<dyn QuestionRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            question_service: Arc::new(QuestionService::new(questions)),
            session_service: Arc::new(SessionService::new(sessions)),
            manager_auth: Arc::new(ManagerAuth::new(config.manager_password.clone())),
            config: Arc::new(config),
        }
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory(config: Config) -> Self {
        let ttl = config.session_ttl();
        Self::with_repositories(
            config,
            Arc::new(InMemoryQuestionRepository::new()),
            Arc::new(InMemorySessionRepository::with_ttl(ttl)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[actix_web::test]
    async fn test_memory_backend_needs_no_database() {
        let state = AppState::new(Config::test_config())
            .await
            .expect("memory backend should start");

        assert_eq!(state.question_service.count().await.unwrap(), 0);
        assert!(state.manager_auth.verify("test-password").is_ok());
    }
}
