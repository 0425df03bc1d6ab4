//! Response bodies for the stats and report endpoints.

use chrono::{DateTime, Utc};
use pr_core::domain::{CountryCount, ReservationStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCountView {
    pub country: String,
    pub count: u64,
}

impl From<CountryCount> for CountryCountView {
    fn from(entry: CountryCount) -> Self {
        Self {
            country: entry.country,
            count: entry.count,
        }
    }
}

/// Reservation figures as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_reservations: u64,
    pub verified_reservations: u64,
    pub unverified_reservations: u64,
    pub reservations_last_2_hours: u64,
    pub top_countries: Vec<CountryCountView>,
    pub generated_at: DateTime<Utc>,
}

impl From<ReservationStats> for StatsView {
    fn from(stats: ReservationStats) -> Self {
        Self {
            total_reservations: stats.total_reservations,
            verified_reservations: stats.verified_reservations,
            unverified_reservations: stats.unverified_reservations,
            reservations_last_2_hours: stats.reservations_last_2_hours,
            top_countries: stats.top_countries.into_iter().map(Into::into).collect(),
            generated_at: stats.generated_at,
        }
    }
}

/// 200 body of `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsView,
}

/// Body of the report dispatch endpoints
///
/// On failure `success` is false and `error` carries the transport message;
/// the stats are included either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendStatsResponse {
    pub success: bool,
    pub message: String,
    pub sent_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stats: StatsView,
}

/// 200 body of `GET /api/cron/init`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronInitResponse {
    pub message: String,
    /// Whether this call registered the timer
    pub started: bool,
    pub state: String,
    pub interval_hours: u32,
    pub next_run: DateTime<Utc>,
}
