//! Reservation entity: an applicant's claim on a phone number.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Uploaded applicant photo, already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Original file name, if the client sent one
    pub file_name: Option<String>,
    /// MIME type (always `image/*` once validated)
    pub content_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl Photo {
    /// Encode the photo as a `data:` URL for storage
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.data))
    }
}

/// Validated applicant input, ready to become a [`Reservation`]
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    /// Normalized (trimmed, lowercased) email
    pub email: String,
    /// Normalized phone number
    pub phone_number: String,
    pub country: String,
    pub photo: Photo,
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for the reservation
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Unique, stored lowercased
    pub email: String,

    /// Unique across all reservations
    pub phone_number: String,

    pub country: String,

    /// Photo stored as a data URL
    pub photo_url: Option<String>,

    pub photo_file_name: Option<String>,

    /// Zero-padded 6-digit code emailed to the applicant
    #[serde(skip_serializing)]
    pub verification_code: String,

    pub is_verified: bool,

    pub verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new, unverified reservation
    pub fn new(applicant: NewReservation, verification_code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: applicant.first_name,
            last_name: applicant.last_name,
            email: applicant.email,
            phone_number: applicant.phone_number,
            country: applicant.country,
            photo_url: Some(applicant.photo.to_data_url()),
            photo_file_name: applicant.photo.file_name,
            verification_code,
            is_verified: false,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the reservation as verified. Verification is never reverted.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.verified_at = Some(now);
        self.updated_at = now;
    }

    /// The code is expired once strictly more than `validity` has elapsed
    /// since the reservation was created.
    pub fn is_code_expired(&self, now: DateTime<Utc>, validity: Duration) -> bool {
        now - self.created_at > validity
    }

    /// Fields safe to return to the applicant
    pub fn summary(&self) -> ReservationSummary {
        ReservationSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            country: self.country.clone(),
        }
    }
}

/// Public view of a verified reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub country: String,
}
