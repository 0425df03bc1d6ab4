//! In-memory implementation of ReservationRepository for tests and local runs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{CountryCount, Reservation};
use crate::errors::{ConflictField, DomainError, ReservationError};

use super::trait_::ReservationRepository;

/// Reservation repository backed by a vector, preserving insertion order
#[derive(Clone, Default)]
pub struct InMemoryReservationRepository {
    reservations: Arc<RwLock<Vec<Reservation>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryReservationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a record without uniqueness checks (test seeding)
    pub async fn insert_raw(&self, reservation: Reservation) {
        self.reservations.write().await.push(reservation);
    }

    /// Snapshot of all stored reservations
    pub async fn all(&self) -> Vec<Reservation> {
        self.reservations.read().await.clone()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Reservation>, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;
        Ok(reservations.iter().find(|r| r.email == email).cloned())
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;
        Ok(reservations.iter().any(|r| r.phone_number == phone_number))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;
        Ok(reservations.iter().any(|r| r.email == email))
    }

    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        self.check_available()?;
        let mut reservations = self.reservations.write().await;

        if reservations.iter().any(|r| r.phone_number == reservation.phone_number) {
            return Err(ReservationError::Conflict { field: ConflictField::PhoneNumber }.into());
        }
        if reservations.iter().any(|r| r.email == reservation.email) {
            return Err(ReservationError::Conflict { field: ConflictField::Email }.into());
        }

        reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn mark_verified(&self, id: Uuid, verified_at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut reservations = self.reservations.write().await;

        match reservations.iter_mut().find(|r| r.id == id && !r.is_verified) {
            Some(reservation) => {
                reservation.mark_verified(verified_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        self.check_available()?;
        Ok(self.reservations.read().await.len() as u64)
    }

    async fn count_verified(&self) -> Result<u64, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;
        Ok(reservations.iter().filter(|r| r.is_verified).count() as u64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;
        Ok(reservations.iter().filter(|r| r.created_at >= since).count() as u64)
    }

    async fn top_countries(&self, limit: usize) -> Result<Vec<CountryCount>, DomainError> {
        self.check_available()?;
        let reservations = self.reservations.read().await;

        let mut counts: Vec<CountryCount> = Vec::new();
        for reservation in reservations.iter() {
            match counts.iter_mut().find(|c| c.country == reservation.country) {
                Some(entry) => entry.count += 1,
                None => counts.push(CountryCount::new(reservation.country.clone(), 1)),
            }
        }

        // sort_by is stable, so ties stay in first-seen order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit);
        Ok(counts)
    }
}
