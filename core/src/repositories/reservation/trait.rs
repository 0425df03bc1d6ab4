//! Reservation repository trait defining the interface for reservation persistence.
//!
//! Implementations must enforce uniqueness of `email` and `phone_number`
//! and report a violation as [`ReservationError::Conflict`] so that a lost
//! check-then-insert race surfaces the same way as a detected duplicate.
//!
//! [`ReservationError::Conflict`]: crate::errors::ReservationError::Conflict

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{CountryCount, Reservation};
use crate::errors::DomainError;

/// Repository trait for Reservation persistence operations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find a reservation by its (lowercased) email
    ///
    /// # Returns
    /// * `Ok(Some(Reservation))` - Reservation found
    /// * `Ok(None)` - No reservation for this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Reservation>, DomainError>;

    /// Check whether a phone number is already reserved
    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError>;

    /// Check whether an email already has a reservation
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert a new reservation
    ///
    /// # Returns
    /// * `Ok(Reservation)` - The stored reservation
    /// * `Err(DomainError::Reservation(Conflict))` - Email or phone already taken
    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError>;

    /// Flip an unverified reservation to verified
    ///
    /// # Returns
    /// * `Ok(true)` - The reservation was unverified and is now verified
    /// * `Ok(false)` - No unverified reservation with this id
    async fn mark_verified(&self, id: Uuid, verified_at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Count all reservations
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Count verified reservations
    async fn count_verified(&self) -> Result<u64, DomainError>;

    /// Count reservations created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Countries with the most reservations, descending by count.
    /// Ties keep store order.
    async fn top_countries(&self, limit: usize) -> Result<Vec<CountryCount>, DomainError>;
}
