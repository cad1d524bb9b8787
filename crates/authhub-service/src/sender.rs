//! Delivery of password-reset codes.

use async_trait::async_trait;
use tracing::{debug, info};

use authhub_core::result::AppResult;

/// Sends a verification code to the owner of an email address.
#[async_trait]
pub trait CodeSender: Send + Sync + 'static {
    async fn send_reset_code(&self, email: &str, code: &str) -> AppResult<()>;
}

/// Sender that only records the dispatch in the log.
#[derive(Debug, Clone, Default)]
pub struct LogCodeSender;

#[async_trait]
impl CodeSender for LogCodeSender {
    async fn send_reset_code(&self, email: &str, code: &str) -> AppResult<()> {
        info!(email = %mask_email(email), "Password reset code dispatched");
        debug!(email, code, "Password reset code");
        Ok(())
    }
}

/// `alice@example.com` becomes `a***@example.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@x.io"), "***@x.io");
        assert_eq!(mask_email("nope"), "***");
    }
}
