//! Main verification service implementation

use pr_shared::email::{mask_email, normalize_email};
use std::sync::Arc;

use crate::domain::entities::{codes_match, ReservationSummary};
use crate::errors::{DomainResult, ReservationError, ValidationError};
use crate::repositories::{AttemptRepository, ReservationRepository};
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::ledger::AttemptLedger;
use super::types::VerifyRequest;

/// Verification service confirming reservations by emailed code
pub struct VerificationService {
    reservations: Arc<dyn ReservationRepository>,
    ledger: AttemptLedger,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `reservations` - Reservation store
    /// * `attempts` - Failed-attempt ledger store
    /// * `clock` - Time source
    /// * `config` - Lockout and expiry settings
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        attempts: Arc<dyn AttemptRepository>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            reservations,
            ledger: AttemptLedger::new(attempts, config),
            clock,
            config,
        }
    }

    /// Verify a reservation code
    ///
    /// This method:
    /// 1. Rejects blank input
    /// 2. Enforces any active lockout for the email/IP pair
    /// 3. Loads the reservation and checks it is unverified and unexpired
    /// 4. Compares the code, counting a failure on mismatch
    /// 5. On success clears the ledger entry and marks the reservation verified
    ///
    /// # Returns
    ///
    /// * `Ok(ReservationSummary)` - Public fields of the verified reservation
    /// * `Err(DomainError)` - Validation, lockout, credential or store failure
    pub async fn verify(&self, request: VerifyRequest) -> DomainResult<ReservationSummary> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.code.trim().is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }
        let ip = request.ip_address.as_str();
        let now = self.clock.now();

        let entry = self.ledger.check(&email, ip, now).await?;

        let Some(reservation) = self.reservations.find_by_email(&email).await? else {
            tracing::info!(
                email = %mask_email(&email),
                ip = ip,
                event = "verification_unknown_email",
                "Verification for unknown email"
            );
            return Err(ReservationError::InvalidCredential.into());
        };

        if reservation.is_verified {
            return Err(ReservationError::AlreadyVerified.into());
        }

        if reservation.is_code_expired(now, self.config.code_validity) {
            tracing::info!(
                reservation_id = %reservation.id,
                event = "verification_code_expired",
                "Verification code expired"
            );
            return Err(ReservationError::CodeExpired.into());
        }

        if !codes_match(&reservation.verification_code, &request.code) {
            self.ledger.record_failure(entry, &email, ip, now).await?;
            return Err(ReservationError::InvalidCredential.into());
        }

        self.ledger.clear(entry).await?;

        if !self.reservations.mark_verified(reservation.id, now).await? {
            // Lost a race with a concurrent successful verification
            return Err(ReservationError::AlreadyVerified.into());
        }

        tracing::info!(
            reservation_id = %reservation.id,
            email = %mask_email(&email),
            event = "reservation_verified",
            "Reservation verified"
        );

        Ok(reservation.summary())
    }
}
