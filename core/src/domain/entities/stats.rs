//! Aggregate reservation statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reservation count for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

impl CountryCount {
    pub fn new(country: impl Into<String>, count: u64) -> Self {
        Self {
            country: country.into(),
            count,
        }
    }
}

/// Snapshot of reservation figures sent in the stats report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStats {
    pub total_reservations: u64,
    pub verified_reservations: u64,
    pub unverified_reservations: u64,
    pub reservations_last_2_hours: u64,
    /// Descending by count
    pub top_countries: Vec<CountryCount>,
    pub generated_at: DateTime<Utc>,
}
