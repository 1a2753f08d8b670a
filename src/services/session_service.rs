use std::sync::Arc;

use crate::{errors::AppResult, models::domain::SessionState, repositories::SessionRepository};

pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// The state stored for `token`, or a fresh default one.
    pub async fn load(&self, token: &str) -> AppResult<SessionState> {
        Ok(self.repository.find(token).await?.unwrap_or_default())
    }

    pub async fn save(&self, token: &str, state: &SessionState) -> AppResult<()> {
        self.repository.save(token, state).await
    }

    /// Drops everything stored for `token`, manager access included.
    pub async fn flush(&self, token: &str) -> AppResult<()> {
        self.repository.delete(token).await?;
        log::debug!("Flushed session state");
        Ok(())
    }

    pub async fn grant_manager_access(&self, token: &str) -> AppResult<SessionState> {
        let mut state = self.load(token).await?;
        state.grant_manager_access();
        self.save(token, &state).await?;
        Ok(state)
    }

    pub async fn revoke_manager_access(&self, token: &str) -> AppResult<()> {
        let mut state = self.load(token).await?;
        if state.manager_access || state.manager_access_time.is_some() {
            state.revoke_manager_access();
            self.save(token, &state).await?;
        }
        Ok(())
    }
}
