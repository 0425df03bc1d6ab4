pub mod attempt;
pub mod reservation;

pub use attempt::{AttemptRepository, InMemoryAttemptRepository};
pub use reservation::{InMemoryReservationRepository, ReservationRepository};
