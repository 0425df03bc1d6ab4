//! Failed verification attempts tracked per email/IP pair.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lockout state of a ledger entry at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    /// Failures are being counted
    Tracking { attempts: u32 },
    /// Attempts are rejected until `until`
    Locked { until: DateTime<Utc> },
    /// A lockout has run out; the counter must be reset before use
    LockExpired,
}

/// Ledger entry for failed verification attempts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAttempt {
    pub id: Uuid,

    /// Lowercased email the attempt was made for
    pub email: String,

    /// Originating client IP
    pub ip_address: String,

    /// Consecutive failed attempts
    pub attempts: u32,

    pub last_attempt: DateTime<Utc>,

    /// Set once `attempts` reaches the configured maximum
    pub locked_until: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl VerificationAttempt {
    /// Creates an empty entry; callers record the first failure on it
    pub fn new(email: impl Into<String>, ip_address: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            ip_address: ip_address.into(),
            attempts: 0,
            last_attempt: now,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> AttemptStatus {
        match self.locked_until {
            Some(until) if until > now => AttemptStatus::Locked { until },
            Some(_) => AttemptStatus::LockExpired,
            None => AttemptStatus::Tracking { attempts: self.attempts },
        }
    }

    /// Whole minutes left on an active lockout, rounded up
    pub fn remaining_lock_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.status(now) {
            AttemptStatus::Locked { until } => {
                let millis = (until - now).num_milliseconds();
                Some((millis + 59_999) / 60_000)
            }
            _ => None,
        }
    }

    /// Clears an expired lockout and zeroes the counter
    pub fn reset_lock(&mut self, now: DateTime<Utc>) {
        self.attempts = 0;
        self.locked_until = None;
        self.updated_at = now;
    }

    /// Counts one failure. Returns `true` when this failure starts a lockout.
    pub fn record_failure(&mut self, now: DateTime<Utc>, max_attempts: u32, lockout: Duration) -> bool {
        self.attempts += 1;
        self.last_attempt = now;
        self.updated_at = now;

        if self.attempts >= max_attempts {
            self.locked_until = Some(now + lockout);
            return true;
        }
        false
    }

    /// Entries vanish `ttl` after creation regardless of state
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at >= ttl
    }
}
