//! Reservation submission service

use pr_shared::email::{is_gmail_address, is_valid_email, mask_email, normalize_email};
use pr_shared::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};
use std::sync::Arc;

use crate::domain::entities::{generate_verification_code, NewReservation, Reservation};
use crate::errors::{ConflictField, DomainResult, ReservationError, ValidationError};
use crate::repositories::ReservationRepository;
use crate::services::clock::Clock;
use crate::services::mail::{render_verification_email, MailServiceTrait};

use super::config::ReservationServiceConfig;
use super::photo::decode_photo;
use super::types::{ReservationReceipt, SubmitReservation};

/// Accepts applicant submissions and issues verification codes
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    mailer: Arc<dyn MailServiceTrait>,
    clock: Arc<dyn Clock>,
    config: ReservationServiceConfig,
}

fn required(value: &str, field: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl ReservationService {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        mailer: Arc<dyn MailServiceTrait>,
        clock: Arc<dyn Clock>,
        config: ReservationServiceConfig,
    ) -> Self {
        Self {
            repository,
            mailer,
            clock,
            config,
        }
    }

    /// Validate the submission into a storable applicant
    fn validate(&self, submission: &SubmitReservation) -> Result<NewReservation, ValidationError> {
        let first_name = required(&submission.first_name, "first_name")?;
        let last_name = required(&submission.last_name, "last_name")?;
        let email = required(&submission.email, "email")?;
        let phone_number = required(&submission.phone_number, "phone_number")?;
        let country = required(&submission.country, "country")?;
        let upload = submission
            .photo
            .as_ref()
            .filter(|p| !p.data.trim().is_empty())
            .ok_or_else(|| ValidationError::RequiredField {
                field: "photo".to_string(),
            })?;

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_gmail_address(&email) {
            return Err(ValidationError::InvalidEmailDomain);
        }
        if !is_valid_phone(&phone_number) {
            return Err(ValidationError::InvalidPhone);
        }

        let photo = decode_photo(upload, self.config.max_photo_bytes)?;

        Ok(NewReservation {
            first_name,
            last_name,
            email: normalize_email(&email),
            phone_number: normalize_phone_number(&phone_number),
            country,
            photo,
        })
    }

    /// Submit a reservation
    ///
    /// Validates input, rejects duplicates, stores an unverified reservation
    /// and emails its verification code. A failed email is logged and does
    /// not fail the submission.
    pub async fn submit(&self, submission: SubmitReservation) -> DomainResult<ReservationReceipt> {
        let applicant = self.validate(&submission)?;

        if self.repository.exists_by_phone(&applicant.phone_number).await? {
            return Err(ReservationError::Conflict {
                field: ConflictField::PhoneNumber,
            }
            .into());
        }
        if self.repository.exists_by_email(&applicant.email).await? {
            return Err(ReservationError::Conflict {
                field: ConflictField::Email,
            }
            .into());
        }

        let code = generate_verification_code();
        let reservation = Reservation::new(applicant, code, self.clock.now());
        // Unique indexes turn a lost race into the same Conflict error
        let reservation = self.repository.create(reservation).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            email = %mask_email(&reservation.email),
            phone = %mask_phone_number(&reservation.phone_number),
            country = %reservation.country,
            event = "reservation_created",
            "Reservation created"
        );

        let content = render_verification_email(
            &reservation.first_name,
            &reservation.verification_code,
            self.config.code_validity_hours,
        );
        let email_sent = match self
            .mailer
            .send(&reservation.email, &content.subject, &content.html)
            .await
        {
            Ok(message_id) => {
                tracing::info!(
                    reservation_id = %reservation.id,
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Verification email sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    reservation_id = %reservation.id,
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                );
                false
            }
        };

        Ok(ReservationReceipt {
            reservation_id: reservation.id,
            email_sent,
        })
    }
}
