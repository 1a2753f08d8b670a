use std::{
    collections::{BTreeMap, HashMap},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    db::{Database, SESSIONS_COLLECTION},
    errors::AppResult,
    models::domain::SessionState,
};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, token: &str) -> AppResult<Option<SessionState>>;
    /// Inserts or replaces the state stored under `token`.
    async fn save(&self, token: &str, state: &SessionState) -> AppResult<()>;
    /// Removes the state; a missing token is not an error.
    async fn delete(&self, token: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

/// Stored shape of a session. Counters are kept as `i64` since BSON has no
/// unsigned integers, and `updated_at` is a native date for the TTL index.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct SessionRecord {
    token: String,
    #[serde(default)]
    quiz_started: bool,
    #[serde(default)]
    current_question: i64,
    #[serde(default)]
    answers: BTreeMap<String, String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    manager_access: bool,
    #[serde(default)]
    manager_access_time: Option<DateTime<Utc>>,
    updated_at: BsonDateTime,
}

impl SessionRecord {
    fn from_state(token: &str, state: &SessionState) -> Self {
        Self {
            token: token.to_string(),
            quiz_started: state.quiz_started,
            current_question: i64::try_from(state.current_question).unwrap_or(i64::MAX),
            answers: state.answers.clone(),
            score: i64::from(state.score),
            manager_access: state.manager_access,
            manager_access_time: state.manager_access_time,
            updated_at: BsonDateTime::now(),
        }
    }
}

impl From<SessionRecord> for SessionState {
    fn from(record: SessionRecord) -> Self {
        SessionState {
            quiz_started: record.quiz_started,
            current_question: usize::try_from(record.current_question).unwrap_or(0),
            answers: record.answers,
            score: u32::try_from(record.score).unwrap_or(0),
            manager_access: record.manager_access,
            manager_access_time: record.manager_access_time,
        }
    }
}

pub struct MongoSessionRepository {
    collection: Collection<SessionRecord>,
    ttl: Duration,
}

impl MongoSessionRepository {
    pub fn new(db: &Database, ttl: Duration) -> Self {
        Self {
            collection: db.get_collection(SESSIONS_COLLECTION),
            ttl,
        }
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn find(&self, token: &str) -> AppResult<Option<SessionState>> {
        let record = self.collection.find_one(doc! { "token": token }).await?;
        Ok(record.map(SessionState::from))
    }

    async fn save(&self, token: &str, state: &SessionState) -> AppResult<()> {
        let record = SessionRecord::from_state(token, state);
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "token": token }, &record)
            .with_options(options)
            .await?;
        Ok(())
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "token": token }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for sessions collection");

        let token_index = IndexModel::builder()
            .keys(doc! { "token": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("token_unique".to_string())
                    .build(),
            )
            .build();

        let expiry_index = IndexModel::builder()
            .keys(doc! { "updated_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(self.ttl)
                    .name("updated_at_ttl".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(token_index).await?;
        self.collection.create_index(expiry_index).await?;

        log::info!(
            "Successfully created indexes for sessions collection (ttl {}s)",
            self.ttl.as_secs()
        );
        Ok(())
    }
}

/// Default lifetime of an idle in-memory session, two weeks.
const DEFAULT_IN_MEMORY_TTL: Duration = Duration::from_secs(336 * 60 * 60);

struct StoredSession {
    state: SessionState,
    updated_at: Instant,
}

/// Process-local store. Sessions idle for longer than `ttl` are treated as
/// absent and swept on the next save, mirroring the Mongo TTL index.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, StoredSession>>,
    ttl: Duration,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_IN_MEMORY_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, stored: &StoredSession) -> bool {
        stored.updated_at.elapsed() >= self.ttl
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find(&self, token: &str) -> AppResult<Option<SessionState>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|stored| !self.is_expired(stored))
            .map(|stored| stored.state.clone()))
    }

    async fn save(&self, token: &str, state: &SessionState) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored));
        if sessions.len() < before {
            log::debug!("Swept {} expired sessions", before - sessions.len());
        }

        sessions.insert(
            token.to_string(),
            StoredSession {
                state: state.clone(),
                updated_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trip_preserves_progress() {
        let mut state = SessionState {
            quiz_started: true,
            current_question: 4,
            score: 3,
            ..Default::default()
        };
        state.answers.insert("12".to_string(), "B".to_string());
        state.grant_manager_access();

        let record = SessionRecord::from_state("token-1", &state);
        assert_eq!(record.token, "token-1");
        assert_eq!(record.current_question, 4);

        assert_eq!(SessionState::from(record), state);
    }

    #[test]
    fn negative_counters_fall_back_to_zero() {
        let record = SessionRecord {
            token: "t".to_string(),
            quiz_started: true,
            current_question: -2,
            answers: BTreeMap::new(),
            score: -1,
            manager_access: false,
            manager_access_time: None,
            updated_at: BsonDateTime::now(),
        };

        let state = SessionState::from(record);
        assert_eq!(state.current_question, 0);
        assert_eq!(state.score, 0);
    }

    #[tokio::test]
    async fn in_memory_save_find_delete() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.find("abc").await.unwrap().is_none());

        let state = SessionState {
            quiz_started: true,
            ..Default::default()
        };
        repo.save("abc", &state).await.unwrap();
        assert_eq!(repo.find("abc").await.unwrap(), Some(state));

        repo.delete("abc").await.unwrap();
        repo.delete("abc").await.unwrap();
        assert!(repo.find("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_expired_sessions_are_absent_and_swept() {
        let repo = InMemorySessionRepository::with_ttl(Duration::ZERO);
        let state = SessionState {
            quiz_started: true,
            ..Default::default()
        };

        repo.save("stale", &state).await.unwrap();
        assert!(repo.find("stale").await.unwrap().is_none());

        repo.save("next", &state).await.unwrap();
        let sessions = repo.sessions.read().await;
        assert!(!sessions.contains_key("stale"));
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn in_memory_live_sessions_survive_sweep() {
        let repo = InMemorySessionRepository::with_ttl(Duration::from_secs(3600));
        let state = SessionState::default();

        repo.save("a", &state).await.unwrap();
        repo.save("b", &state).await.unwrap();

        assert!(repo.find("a").await.unwrap().is_some());
        assert_eq!(repo.sessions.read().await.len(), 2);
    }
}
