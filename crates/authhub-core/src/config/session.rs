//! Session registry configuration.

use serde::{Deserialize, Serialize};

/// Liveness windows and background sweep settings for issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// A refresh token is live only if created within this many days.
    #[serde(default = "default_live_window")]
    pub refresh_live_window_days: u32,
    /// The sweep revokes refresh tokens older than this many calendar months.
    #[serde(default = "default_refresh_retention")]
    pub refresh_retention_months: u32,
    /// The sweep revokes access tokens older than this many minutes.
    #[serde(default = "default_access_retention")]
    pub access_retention_minutes: u64,
    /// Whether the background sweep is scheduled.
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,
    /// Cron expression (with seconds) for the sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_live_window_days: default_live_window(),
            refresh_retention_months: default_refresh_retention(),
            access_retention_minutes: default_access_retention(),
            sweep_enabled: default_true(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_live_window() -> u32 {
    7
}

fn default_refresh_retention() -> u32 {
    1
}

fn default_access_retention() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    "0 0 * * * *".to_string()
}
