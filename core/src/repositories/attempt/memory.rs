//! In-memory implementation of AttemptRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::VerificationAttempt;
use crate::errors::DomainError;

use super::trait_::AttemptRepository;

/// Attempt ledger held in a map keyed by record id
#[derive(Clone, Default)]
pub struct InMemoryAttemptRepository {
    attempts: Arc<RwLock<HashMap<Uuid, VerificationAttempt>>>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.attempts.read().await.is_empty()
    }

    /// Fetch a record by id regardless of age
    pub async fn get(&self, id: Uuid) -> Option<VerificationAttempt> {
        self.attempts.read().await.get(&id).cloned()
    }

    /// Snapshot of every stored record
    pub async fn all(&self) -> Vec<VerificationAttempt> {
        self.attempts.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn find_matching(
        &self,
        email: &str,
        ip_address: &str,
        created_after: DateTime<Utc>,
    ) -> Result<Option<VerificationAttempt>, DomainError> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .filter(|a| a.created_at > created_after)
            .filter(|a| a.email == email || a.ip_address == ip_address)
            .min_by_key(|a| a.created_at)
            .cloned())
    }

    async fn create(&self, attempt: VerificationAttempt) -> Result<VerificationAttempt, DomainError> {
        let mut attempts = self.attempts.write().await;
        attempts.insert(attempt.id, attempt.clone());
        Ok(attempt)
    }

    async fn update(&self, attempt: &VerificationAttempt) -> Result<(), DomainError> {
        let mut attempts = self.attempts.write().await;
        // A record purged concurrently is simply not resurrected
        if let Some(existing) = attempts.get_mut(&attempt.id) {
            *existing = attempt.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.attempts.write().await.remove(&id).is_some())
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|_, a| a.created_at >= cutoff);
        Ok((before - attempts.len()) as u64)
    }
}
