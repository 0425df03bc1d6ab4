//! Fixed-schedule runner for the stats report
//!
//! The report fires at minute 0 of every n-th hour of the UTC day, so the
//! default interval of 2 matches the cron expression `0 */2 * * *`.

use chrono::{DateTime, Duration, Timelike, Utc};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::services::clock::Clock;

use super::report::StatsReporter;

/// Registration state of the report timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SchedulerState {
    NotStarted = 0,
    Running = 1,
}

impl SchedulerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerState::NotStarted => "not_started",
            SchedulerState::Running => "running",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => SchedulerState::Running,
            _ => SchedulerState::NotStarted,
        }
    }
}

/// Next fire time strictly after `now`
pub fn next_fire_after(now: DateTime<Utc>, interval_hours: u32) -> DateTime<Utc> {
    let interval = interval_hours.clamp(1, 24);
    let into_hour = Duration::seconds(i64::from(now.minute() * 60 + now.second()))
        + Duration::nanoseconds(i64::from(now.nanosecond()));
    let hour_start = now - into_hour;

    let mut candidate = hour_start + Duration::hours(1);
    while candidate.hour() % interval != 0 {
        candidate += Duration::hours(1);
    }
    candidate
}

/// Next fire time after both `now` and the slot that last fired
///
/// A wall clock stepping backwards never yields the same slot twice.
pub(crate) fn next_slot(
    now: DateTime<Utc>,
    last_fired: Option<DateTime<Utc>>,
    interval_hours: u32,
) -> DateTime<Utc> {
    let floor = last_fired.map_or(now, |fired| now.max(fired));
    next_fire_after(floor, interval_hours)
}

/// Owns the report timer. At most one timer is ever registered.
pub struct ReportScheduler {
    reporter: Arc<StatsReporter>,
    clock: Arc<dyn Clock>,
    interval_hours: u32,
    state: AtomicU8,
    timers_registered: AtomicUsize,
}

impl ReportScheduler {
    pub fn new(reporter: Arc<StatsReporter>, clock: Arc<dyn Clock>, interval_hours: u32) -> Self {
        Self {
            reporter,
            clock,
            interval_hours: interval_hours.clamp(1, 24),
            state: AtomicU8::new(SchedulerState::NotStarted as u8),
            timers_registered: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> SchedulerState {
        SchedulerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn interval_hours(&self) -> u32 {
        self.interval_hours
    }

    /// Number of timers spawned over the scheduler's lifetime
    pub fn timers_registered(&self) -> usize {
        self.timers_registered.load(Ordering::Acquire)
    }

    /// When the timer would next fire, measured from now
    pub fn next_run(&self) -> DateTime<Utc> {
        next_fire_after(self.clock.now(), self.interval_hours)
    }

    /// Register the report timer unless it is already running
    ///
    /// Returns `true` if this call started the timer. Safe to call
    /// concurrently; exactly one caller wins. Must run inside a Tokio runtime.
    pub fn ensure_started(self: &Arc<Self>) -> bool {
        let won = self
            .state
            .compare_exchange(
                SchedulerState::NotStarted as u8,
                SchedulerState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if !won {
            return false;
        }

        self.timers_registered.fetch_add(1, Ordering::AcqRel);
        info!(
            interval_hours = self.interval_hours,
            recipient = %self.reporter.recipient(),
            next_run = %self.next_run(),
            "Stats report schedule started"
        );

        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            scheduler.run_timer().await;
        });

        true
    }

    async fn run_timer(&self) {
        let mut last_fired = None;
        loop {
            let now = self.clock.now();
            let next = next_slot(now, last_fired, self.interval_hours);
            let wait = (next - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            self.fire().await;
            last_fired = Some(next);
        }
    }

    /// Run one report. Failures are logged, never retried.
    async fn fire(&self) {
        match self.reporter.send_report().await {
            Ok(delivery) if delivery.is_sent() => {}
            Ok(delivery) => {
                warn!(
                    error = delivery.error.as_deref().unwrap_or_default(),
                    "Scheduled stats report was not delivered"
                );
            }
            Err(e) => {
                error!(error = %e, "Scheduled stats report failed");
            }
        }
    }
}
