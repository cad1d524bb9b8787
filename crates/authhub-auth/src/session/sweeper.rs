//! Periodic revocation of tokens past their retention window.

use std::sync::Arc;

use tracing::{error, info};

use authhub_core::error::AppError;
use authhub_database::{SessionRegistry, SweepReport};

/// Runs one sweep of the session registry and logs the outcome.
#[derive(Clone)]
pub struct SessionSweeper {
    registry: Arc<dyn SessionRegistry>,
}

impl std::fmt::Debug for SessionSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSweeper").finish()
    }
}

impl SessionSweeper {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn run(&self) -> Result<SweepReport, AppError> {
        match self.registry.sweep_expired().await {
            Ok(report) if report.is_empty() => {
                info!("Session sweep found nothing to revoke");
                Ok(report)
            }
            Ok(report) => {
                info!(
                    refresh_revoked = report.refresh_revoked,
                    access_revoked = report.access_revoked,
                    "Session sweep revoked expired tokens"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Session sweep failed");
                Err(e)
            }
        }
    }
}
