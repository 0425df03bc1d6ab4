//! Repository trait for the verification attempt ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::VerificationAttempt;
use crate::errors::DomainError;

/// Persistence for failed verification attempts
///
/// Records created before `created_after` are treated as expired and must
/// not be returned by lookups even if they have not been purged yet.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Find the oldest live record whose email OR IP matches
    async fn find_matching(
        &self,
        email: &str,
        ip_address: &str,
        created_after: DateTime<Utc>,
    ) -> Result<Option<VerificationAttempt>, DomainError>;

    /// Insert a new ledger entry
    async fn create(&self, attempt: VerificationAttempt) -> Result<VerificationAttempt, DomainError>;

    /// Persist counter and lock changes on an existing entry
    async fn update(&self, attempt: &VerificationAttempt) -> Result<(), DomainError>;

    /// Delete an entry. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete entries created before `cutoff`, returning how many were removed
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
