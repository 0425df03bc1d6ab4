//! Reservation submission workflow

mod config;
mod photo;
mod service;
mod types;


pub use config::ReservationServiceConfig;
pub use photo::decode_photo;
pub use service::ReservationService;
pub use types::{PhotoUpload, ReservationReceipt, SubmitReservation};
