//! Domain entities representing core business objects.

pub mod reservation;
pub mod stats;
pub mod verification_attempt;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use reservation::{NewReservation, Photo, Reservation, ReservationSummary};
pub use stats::{CountryCount, ReservationStats};
pub use verification_attempt::{AttemptStatus, VerificationAttempt};
pub use verification_code::{codes_match, generate_verification_code, CODE_LENGTH};
