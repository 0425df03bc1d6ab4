//! Tests for the report schedule and its idempotent registration

use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::repositories::InMemoryReservationRepository;
use crate::services::clock::ManualClock;
use crate::services::mail::mock::RecordingMailer;
use crate::services::stats::scheduler::next_slot;
use crate::services::stats::{
    next_fire_after, ReportScheduler, SchedulerState, StatsAggregator, StatsReporter,
};

fn scheduler_at(
    now: chrono::DateTime<Utc>,
    mailer: Arc<RecordingMailer>,
) -> Arc<ReportScheduler> {
    let clock = Arc::new(ManualClock::new(now));
    let aggregator = Arc::new(StatsAggregator::new(
        Arc::new(InMemoryReservationRepository::new()),
        clock.clone(),
    ));
    let reporter = Arc::new(StatsReporter::new(aggregator, mailer, "admin@example.com"));
    Arc::new(ReportScheduler::new(reporter, clock, 2))
}

#[test]
fn test_next_fire_every_two_hours() {
    let at = |h, m, s| Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap();

    assert_eq!(next_fire_after(at(0, 0, 0), 2), at(2, 0, 0));
    assert_eq!(next_fire_after(at(1, 30, 15), 2), at(2, 0, 0));
    assert_eq!(next_fire_after(at(2, 0, 0), 2), at(4, 0, 0));
    assert_eq!(next_fire_after(at(3, 59, 59), 2), at(4, 0, 0));
    assert_eq!(
        next_fire_after(at(23, 10, 0), 2),
        Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_next_slot_never_repeats_a_fired_slot() {
    let at = |h, m, s| Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap();

    assert_eq!(next_slot(at(9, 15, 0), None, 2), at(10, 0, 0));
    // Woke slightly early, or the wall clock stepped back after the 10:00 fire
    assert_eq!(next_slot(at(9, 59, 30), Some(at(10, 0, 0)), 2), at(12, 0, 0));
    assert_eq!(next_slot(at(10, 0, 1), Some(at(10, 0, 0)), 2), at(12, 0, 0));
    // A clock that jumped ahead skips to the slot after now
    assert_eq!(next_slot(at(13, 5, 0), Some(at(10, 0, 0)), 2), at(14, 0, 0));
}

#[test]
fn test_next_fire_other_intervals() {
    let at = |h, m| Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap();

    assert_eq!(next_fire_after(at(5, 20), 1), at(6, 0));
    assert_eq!(next_fire_after(at(5, 20), 6), at(6, 0));
    assert_eq!(next_fire_after(at(6, 0), 6), at(12, 0));
    // Intervals that do not divide the day restart at midnight, as cron does
    assert_eq!(
        next_fire_after(at(21, 0), 5),
        Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_ensure_started_twice_registers_one_timer() {
    let scheduler = scheduler_at(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        Arc::new(RecordingMailer::new()),
    );
    assert_eq!(scheduler.state(), SchedulerState::NotStarted);

    assert!(scheduler.ensure_started());
    assert!(!scheduler.ensure_started());

    assert_eq!(scheduler.state(), SchedulerState::Running);
    assert_eq!(scheduler.timers_registered(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ensure_started_registers_one_timer() {
    let scheduler = scheduler_at(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        Arc::new(RecordingMailer::new()),
    );

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.ensure_started() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(scheduler.timers_registered(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timer_fires_on_schedule() {
    let mailer = Arc::new(RecordingMailer::new());
    // One second before the 14:00 slot
    let scheduler = scheduler_at(Utc.with_ymd_and_hms(2024, 3, 1, 13, 59, 59).unwrap(), mailer.clone());

    scheduler.ensure_started();

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    assert!(mailer.sent().is_empty());

    tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "admin@example.com");
}
