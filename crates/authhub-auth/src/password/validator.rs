//! Password policy for new passwords.

use authhub_core::config::AuthConfig;
use authhub_core::error::AppError;

/// Upper bound keeping Argon2 input sizes reasonable.
const MAX_LENGTH: usize = 128;

/// Length policy applied on registration, password change and reset.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_LENGTH} characters long"
            )));
        }
        Ok(())
    }
}
