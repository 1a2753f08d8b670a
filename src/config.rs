use std::{env, str::FromStr, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_RECIPIENT_NAME: &str = "حبيبتي";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "unknown STORAGE_BACKEND '{}', expected 'mongo' or 'memory'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub storage_backend: StorageBackend,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub manager_password: SecretString,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
    pub session_ttl_hours: u64,
    pub recipient_name: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let manager_password = env::var("MANAGER_PASSWORD")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("MANAGER_PASSWORD must be set".to_string())
            })?;

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Mongo,
        };

        Ok(Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            storage_backend,
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            manager_password: SecretString::from(manager_password),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "quiz_session".to_string()),
            session_cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24 * 14),
            recipient_name: env::var("QUIZ_RECIPIENT_NAME")
                .unwrap_or_else(|_| DEFAULT_RECIPIENT_NAME.to_string()),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours * 60 * 60)
    }

    /// Logs a warning for settings that are fine locally but not when exposed.
    pub fn warn_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.manager_password.expose_secret().len() < 8 {
            log::warn!("MANAGER_PASSWORD is shorter than 8 characters");
        }

        if !self.session_cookie_secure {
            log::warn!("session cookie is sent without the Secure flag");
        }

        if self.storage_backend == StorageBackend::Memory {
            log::warn!("in-memory storage: questions and sessions are lost on restart");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-test".to_string(),
            storage_backend: StorageBackend::Memory,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            manager_password: SecretString::from("test-password".to_string()),
            session_cookie_name: "quiz_session".to_string(),
            session_cookie_secure: false,
            session_ttl_hours: 1,
            recipient_name: DEFAULT_RECIPIENT_NAME.to_string(),
        }
    }
}
