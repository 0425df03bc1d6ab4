//! Periodic stats report configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Schedule and recipient of the stats report email
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Address receiving the stats report
    pub recipient: String,

    /// Hours between reports; fires at minute 0 of every n-th hour (UTC)
    pub interval_hours: u32,

    /// Register the schedule when the server boots
    pub start_on_boot: bool,

    /// Seconds to wait after boot before registering the schedule
    pub boot_delay_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recipient: String::from("stats@localhost"),
            interval_hours: 2,
            start_on_boot: true,
            boot_delay_secs: 3,
        }
    }
}

impl ReportConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            recipient: std::env::var("STATS_EMAIL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.recipient),
            interval_hours: env_or("STATS_INTERVAL_HOURS", defaults.interval_hours).clamp(1, 24),
            start_on_boot: env_or("STATS_START_ON_BOOT", defaults.start_on_boot),
            boot_delay_secs: env_or("STATS_BOOT_DELAY_SECS", defaults.boot_delay_secs),
        }
    }
}
