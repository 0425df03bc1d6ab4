//! Domain-specific error types for reservation submission and verification
//!
//! The `Display` output of each variant is the message shown to applicants,
//! so wording is kept stable.

use thiserror::Error;

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    RequiredField { field: String },

    #[error("Email and verification code are required")]
    MissingCredentials,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Only Gmail accounts are permitted")]
    InvalidEmailDomain,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid photo: {reason}")]
    InvalidPhoto { reason: String },
}

impl ValidationError {
    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field } => Some(field),
            ValidationError::MissingCredentials => None,
            ValidationError::InvalidEmail | ValidationError::InvalidEmailDomain => Some("email"),
            ValidationError::InvalidPhone => Some("phone_number"),
            ValidationError::InvalidPhoto { .. } => Some("photo"),
        }
    }
}

/// Field that collided with an existing reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    PhoneNumber,
    Email,
}

impl ConflictField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictField::PhoneNumber => "phone_number",
            ConflictField::Email => "email",
        }
    }
}

/// Reservation and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("{}", conflict_message(*field))]
    Conflict { field: ConflictField },

    #[error("Too many failed attempts. Account locked for {minutes} more minute(s).")]
    RateLimited { minutes: i64 },

    /// Unknown email and wrong code share one message
    #[error("Invalid email or verification code")]
    InvalidCredential,

    #[error("This reservation has already been verified")]
    AlreadyVerified,

    #[error("Verification code has expired. Please submit a new reservation.")]
    CodeExpired,
}

fn conflict_message(field: ConflictField) -> &'static str {
    match field {
        ConflictField::PhoneNumber => "This phone number has already been reserved",
        ConflictField::Email => "This email already has a reservation",
    }
}

impl ReservationError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::Conflict { .. } => "CONFLICT",
            ReservationError::RateLimited { .. } => "RATE_LIMITED",
            ReservationError::InvalidCredential => "INVALID_CREDENTIAL",
            ReservationError::AlreadyVerified => "ALREADY_VERIFIED",
            ReservationError::CodeExpired => "CODE_EXPIRED",
        }
    }
}
