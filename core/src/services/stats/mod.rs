//! Reservation statistics and the periodic stats report
//!
//! - `StatsAggregator` computes figures from the reservation store
//! - `StatsReporter` renders and emails them
//! - `ReportScheduler` fires the reporter on a fixed UTC schedule

mod aggregator;
mod report;
mod scheduler;

#[cfg(test)]
mod tests;

pub use aggregator::{StatsAggregator, RECENT_WINDOW_HOURS, TOP_COUNTRIES_LIMIT};
pub use report::{ReportDelivery, StatsReporter};
pub use scheduler::{next_fire_after, ReportScheduler, SchedulerState};
