//! Session sweep job.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use authhub_auth::SessionSweeper;
use authhub_database::SweepReport;

/// Wraps the sweeper so that a slow run is never overlapped by the next
/// tick; the later tick is skipped instead.
#[derive(Debug, Clone)]
pub struct SweepJob {
    sweeper: SessionSweeper,
    running: Arc<Mutex<()>>,
}

impl SweepJob {
    pub fn new(sweeper: SessionSweeper) -> Self {
        Self {
            sweeper,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Run one sweep. Returns `None` if a previous run is still in progress
    /// or the sweep failed.
    pub async fn execute(&self) -> Option<SweepReport> {
        let Ok(_guard) = self.running.try_lock() else {
            warn!("Previous session sweep still running, skipping tick");
            return None;
        };

        debug!("Running session sweep");
        self.sweeper.run().await.ok()
    }
}
