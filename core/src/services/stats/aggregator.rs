use chrono::Duration;
use std::sync::Arc;

use crate::domain::entities::ReservationStats;
use crate::errors::DomainResult;
use crate::repositories::ReservationRepository;
use crate::services::clock::Clock;

/// Number of countries listed in the stats
pub const TOP_COUNTRIES_LIMIT: usize = 10;

/// Width of the "recent reservations" window
pub const RECENT_WINDOW_HOURS: i64 = 2;

/// Read-only aggregation over the reservation store
pub struct StatsAggregator {
    repository: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsAggregator {
    pub fn new(repository: Arc<dyn ReservationRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Compute the current figures. Store failures propagate unchanged.
    pub async fn collect(&self) -> DomainResult<ReservationStats> {
        let now = self.clock.now();

        let total = self.repository.count_all().await?;
        let verified = self.repository.count_verified().await?;
        let recent = self
            .repository
            .count_created_since(now - Duration::hours(RECENT_WINDOW_HOURS))
            .await?;
        let top_countries = self.repository.top_countries(TOP_COUNTRIES_LIMIT).await?;

        Ok(ReservationStats {
            total_reservations: total,
            verified_reservations: verified,
            // Counts are separate reads, so guard against a verify landing in between
            unverified_reservations: total.saturating_sub(verified),
            reservations_last_2_hours: recent,
            top_countries,
            generated_at: now,
        })
    }
}
