use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

/// Shared-secret check for the manager screens.
pub struct ManagerAuth {
    password: SecretString,
}

impl ManagerAuth {
    pub fn new(password: SecretString) -> Self {
        Self { password }
    }

    /// Surrounding whitespace in the submitted password is ignored.
    pub fn verify(&self, candidate: &str) -> AppResult<()> {
        if candidate.trim() == self.password.expose_secret() {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
