//! Periodic purge of expired verification attempt records
//!
//! Relational storage has no TTL index, so entries older than the ledger
//! TTL are deleted on a timer. Lookups already ignore them.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::AttemptRepository;
use crate::services::clock::Clock;

/// Configuration for the attempt cleanup service
#[derive(Debug, Clone)]
pub struct AttemptCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Age after which an entry is deleted
    pub ttl: chrono::Duration,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for AttemptCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            ttl: chrono::Duration::hours(24),
            enabled: true,
        }
    }
}

/// Service deleting expired ledger entries
pub struct AttemptCleanupService {
    repository: Arc<dyn AttemptRepository>,
    clock: Arc<dyn Clock>,
    config: AttemptCleanupConfig,
}

impl AttemptCleanupService {
    pub fn new(
        repository: Arc<dyn AttemptRepository>,
        clock: Arc<dyn Clock>,
        config: AttemptCleanupConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = self.clock.now() - self.config.ttl;
        let deleted = self.repository.purge_created_before(cutoff).await?;

        if deleted > 0 {
            info!(deleted, %cutoff, "Purged expired verification attempts");
        }

        Ok(CleanupResult {
            expired_attempts_deleted: deleted,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Verification attempt cleanup is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Attempt cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Attempt cleanup cycle failed: {}", e);
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired attempt records deleted
    pub expired_attempts_deleted: u64,
}
