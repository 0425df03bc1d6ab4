//! Reservation submission and email verification endpoints

pub mod reserve;
pub mod verify;

pub use reserve::reserve;
pub use verify::verify;
