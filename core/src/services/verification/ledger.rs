//! Failed-attempt ledger enforcing verification lockouts

use chrono::{DateTime, Utc};
use pr_shared::email::mask_email;
use std::sync::Arc;

use crate::domain::entities::{AttemptStatus, VerificationAttempt};
use crate::errors::{DomainResult, ReservationError};
use crate::repositories::AttemptRepository;

use super::config::VerificationServiceConfig;

/// Lockout state machine over the attempt repository
///
/// An entry is shared by any request whose email OR IP matches it.
pub struct AttemptLedger {
    repository: Arc<dyn AttemptRepository>,
    config: VerificationServiceConfig,
}

impl AttemptLedger {
    pub fn new(repository: Arc<dyn AttemptRepository>, config: VerificationServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Resolve the entry for this email/IP pair and enforce any active lock
    ///
    /// # Returns
    /// * `Ok(Some(entry))` - Entry exists and permits an attempt (expired locks are reset and saved)
    /// * `Ok(None)` - No live entry
    /// * `Err(RateLimited)` - Entry is locked; nothing is written
    pub async fn check(
        &self,
        email: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationAttempt>> {
        let cutoff = now - self.config.attempt_ttl;
        let Some(mut entry) = self.repository.find_matching(email, ip_address, cutoff).await? else {
            return Ok(None);
        };

        match entry.status(now) {
            AttemptStatus::Locked { until } => {
                let minutes = entry.remaining_lock_minutes(now).unwrap_or(1);
                tracing::warn!(
                    email = %mask_email(email),
                    ip = ip_address,
                    locked_until = %until,
                    minutes_left = minutes,
                    event = "verification_locked",
                    "Verification attempt rejected by lockout"
                );
                Err(ReservationError::RateLimited { minutes }.into())
            }
            AttemptStatus::LockExpired => {
                entry.reset_lock(now);
                self.repository.update(&entry).await?;
                tracing::info!(
                    email = %mask_email(email),
                    ip = ip_address,
                    event = "verification_lock_reset",
                    "Expired lockout cleared"
                );
                Ok(Some(entry))
            }
            AttemptStatus::Tracking { .. } => Ok(Some(entry)),
        }
    }

    /// Count a failed attempt against `entry`, creating one if needed
    pub async fn record_failure(
        &self,
        entry: Option<VerificationAttempt>,
        email: &str,
        ip_address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<VerificationAttempt> {
        let max = self.config.max_failed_attempts;
        let lockout = self.config.lockout;

        let entry = match entry {
            Some(mut entry) => {
                let locked = entry.record_failure(now, max, lockout);
                self.repository.update(&entry).await?;
                if locked {
                    tracing::warn!(
                        email = %mask_email(email),
                        ip = ip_address,
                        attempts = entry.attempts,
                        event = "verification_lock_started",
                        "Too many failed verification attempts, locking"
                    );
                }
                entry
            }
            None => {
                let mut entry = VerificationAttempt::new(email, ip_address, now);
                entry.record_failure(now, max, lockout);
                self.repository.create(entry).await?
            }
        };

        tracing::info!(
            email = %mask_email(email),
            ip = ip_address,
            attempts = entry.attempts,
            event = "verification_failed",
            "Failed verification attempt recorded"
        );
        Ok(entry)
    }

    /// Drop the entry after a successful verification
    pub async fn clear(&self, entry: Option<VerificationAttempt>) -> DomainResult<()> {
        if let Some(entry) = entry {
            self.repository.delete(entry.id).await?;
        }
        Ok(())
    }
}
