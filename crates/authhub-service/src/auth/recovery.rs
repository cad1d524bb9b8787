//! Password reset by emailed verification code.

use std::sync::Arc;

use tracing::{error, info, warn};

use authhub_cache::VerificationCodeStore;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_auth::PasswordValidator;

use crate::credentials::CredentialStore;
use crate::sender::CodeSender;

pub const INVALID_OR_EXPIRED_CODE: &str = "Invalid or expired code";
pub const INVALID_CODE: &str = "Invalid code";

#[derive(Clone)]
pub struct RecoveryService {
    credentials: Arc<CredentialStore>,
    codes: VerificationCodeStore,
    sender: Arc<dyn CodeSender>,
    validator: PasswordValidator,
}

impl std::fmt::Debug for RecoveryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryService")
            .field("codes", &self.codes)
            .finish_non_exhaustive()
    }
}

impl RecoveryService {
    pub fn new(
        credentials: Arc<CredentialStore>,
        codes: VerificationCodeStore,
        sender: Arc<dyn CodeSender>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            credentials,
            codes,
            sender,
            validator,
        }
    }

    /// Issue a reset code for a registered email and send it.
    pub async fn request_reset(&self, email: &str) -> AppResult<()> {
        if self.credentials.get_by_email(email).await?.is_none() {
            return Err(AppError::not_found("Email not found"));
        }

        let code = self.codes.issue(email).await?;
        if let Err(e) = self.sender.send_reset_code(email, &code).await {
            error!(error = %e, "Failed to send password reset code");
            return Err(AppError::internal("Failed to send reset code"));
        }

        info!("Password reset code issued");
        Ok(())
    }

    /// Replace the password if `code` matches the pending one.
    ///
    /// The code is consumed on success.
    pub async fn reset_password(&self, email: &str, password: &str, code: &str) -> AppResult<()> {
        self.validator.validate(password)?;

        let pending = self
            .codes
            .pending(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_OR_EXPIRED_CODE))?;
        if pending != code.trim() {
            return Err(AppError::unauthorized(INVALID_CODE));
        }

        self.credentials.update_password(email, password).await?;
        if let Err(e) = self.codes.consume(email).await {
            warn!(error = %e, "Failed to discard used reset code");
        }

        info!("Password reset");
        Ok(())
    }
}
