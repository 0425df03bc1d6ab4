//! Verification attempt limits

use serde::{Deserialize, Serialize};

use super::env_or;

/// Limits applied to email verification attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationLimits {
    /// Failed attempts that trigger a lockout
    pub max_failed_attempts: u32,

    /// Lockout duration in minutes
    pub lockout_minutes: i64,

    /// Lifetime of an attempt record, counted from its creation
    pub attempt_ttl_hours: i64,

    /// Lifetime of a verification code, counted from reservation creation
    pub code_validity_hours: i64,
}

impl Default for VerificationLimits {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_minutes: 30,
            attempt_ttl_hours: 24,
            code_validity_hours: 24,
        }
    }
}

impl VerificationLimits {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_failed_attempts: env_or("VERIFY_MAX_FAILED_ATTEMPTS", defaults.max_failed_attempts),
            lockout_minutes: env_or("VERIFY_LOCKOUT_MINUTES", defaults.lockout_minutes),
            attempt_ttl_hours: env_or("VERIFY_ATTEMPT_TTL_HOURS", defaults.attempt_ttl_hours),
            code_validity_hours: env_or("VERIFY_CODE_VALIDITY_HOURS", defaults.code_validity_hours),
        }
    }
}
