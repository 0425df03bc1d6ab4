//! Configuration for the reservation service

/// Largest accepted photo, decoded
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ReservationServiceConfig {
    /// Upper bound on decoded photo size in bytes
    pub max_photo_bytes: usize,
    /// Validity stated in the verification email
    pub code_validity_hours: i64,
}

impl Default for ReservationServiceConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            code_validity_hours: 24,
        }
    }
}
