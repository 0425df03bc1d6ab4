//! Configuration for the verification service

use chrono::Duration;
use pr_shared::VerificationLimits;

/// Configuration for the verification service
#[derive(Debug, Clone, Copy)]
pub struct VerificationServiceConfig {
    /// Failed attempts that lock the email/IP pair
    pub max_failed_attempts: u32,
    /// How long a lockout lasts
    pub lockout: Duration,
    /// Lifetime of a ledger entry from its creation
    pub attempt_ttl: Duration,
    /// Lifetime of a verification code from reservation creation
    pub code_validity: Duration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        VerificationLimits::default().into()
    }
}

impl From<VerificationLimits> for VerificationServiceConfig {
    fn from(limits: VerificationLimits) -> Self {
        Self {
            max_failed_attempts: limits.max_failed_attempts.max(1),
            lockout: Duration::minutes(limits.lockout_minutes),
            attempt_ttl: Duration::hours(limits.attempt_ttl_hours),
            code_validity: Duration::hours(limits.code_validity_hours),
        }
    }
}
