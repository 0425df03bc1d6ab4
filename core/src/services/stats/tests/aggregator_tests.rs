//! Tests for stats aggregation and report delivery

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::{CountryCount, NewReservation, Photo, Reservation};
use crate::errors::DomainError;
use crate::repositories::InMemoryReservationRepository;
use crate::services::clock::ManualClock;
use crate::services::mail::mock::RecordingMailer;
use crate::services::stats::{StatsAggregator, StatsReporter};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn reservation(n: usize, country: &str, created_at: DateTime<Utc>, verified: bool) -> Reservation {
    let mut reservation = Reservation::new(
        NewReservation {
            first_name: format!("User{}", n),
            last_name: "Test".to_string(),
            email: format!("user{}@gmail.com", n),
            phone_number: format!("+1555000{:04}", n),
            country: country.to_string(),
            photo: Photo {
                file_name: None,
                content_type: "image/png".to_string(),
                data: vec![1],
            },
        },
        "123456".to_string(),
        created_at,
    );
    if verified {
        reservation.mark_verified(created_at);
    }
    reservation
}

/// 6 from Nigeria, 4 from the US, 7 verified
async fn seeded_repo() -> InMemoryReservationRepository {
    let repo = InMemoryReservationRepository::new();
    for n in 0..10 {
        let country = if n < 6 { "Nigeria" } else { "United States" };
        let created_at = if n < 3 { now() - Duration::minutes(30) } else { now() - Duration::hours(5) };
        repo.insert_raw(reservation(n, country, created_at, n < 7)).await;
    }
    repo
}

#[tokio::test]
async fn test_collect_figures() {
    let repo = seeded_repo().await;
    let aggregator = StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now())));

    let stats = aggregator.collect().await.unwrap();
    assert_eq!(stats.total_reservations, 10);
    assert_eq!(stats.verified_reservations, 7);
    assert_eq!(stats.unverified_reservations, 3);
    assert_eq!(stats.reservations_last_2_hours, 3);
    assert_eq!(
        stats.top_countries,
        vec![
            CountryCount::new("Nigeria", 6),
            CountryCount::new("United States", 4)
        ]
    );
    assert_eq!(stats.generated_at, now());
}

#[tokio::test]
async fn test_recent_window_is_inclusive() {
    let repo = InMemoryReservationRepository::new();
    repo.insert_raw(reservation(1, "Ghana", now() - Duration::hours(2), false)).await;
    repo.insert_raw(reservation(2, "Ghana", now() - Duration::hours(2) - Duration::seconds(1), false))
        .await;

    let aggregator = StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now())));
    let stats = aggregator.collect().await.unwrap();
    assert_eq!(stats.reservations_last_2_hours, 1);
}

#[tokio::test]
async fn test_top_countries_capped_at_ten() {
    let repo = InMemoryReservationRepository::new();
    for n in 0..12 {
        repo.insert_raw(reservation(n, &format!("Country{}", n), now(), false)).await;
    }

    let aggregator = StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now())));
    let stats = aggregator.collect().await.unwrap();
    assert_eq!(stats.top_countries.len(), 10);
    assert_eq!(stats.top_countries[0].country, "Country0");
}

#[tokio::test]
async fn test_empty_store() {
    let aggregator = StatsAggregator::new(
        Arc::new(InMemoryReservationRepository::new()),
        Arc::new(ManualClock::new(now())),
    );
    let stats = aggregator.collect().await.unwrap();
    assert_eq!(stats.total_reservations, 0);
    assert!(stats.top_countries.is_empty());
}

#[tokio::test]
async fn test_store_failure_is_dependency_unavailable() {
    let repo = InMemoryReservationRepository::new();
    repo.set_unavailable(true);
    let aggregator = StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now())));

    let err = aggregator.collect().await.unwrap_err();
    assert!(matches!(err, DomainError::DependencyUnavailable { .. }));
}

#[tokio::test]
async fn test_report_sent_to_recipient() {
    let repo = seeded_repo().await;
    let aggregator = Arc::new(StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now()))));
    let mailer = Arc::new(RecordingMailer::new());
    let reporter = StatsReporter::new(aggregator, mailer.clone(), "admin@example.com");

    let delivery = reporter.send_report().await.unwrap();
    assert!(delivery.is_sent());
    assert_eq!(delivery.recipient, "admin@example.com");
    assert_eq!(delivery.stats.total_reservations, 10);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "admin@example.com");
    assert_eq!(sent[0].subject, "Phone Number Reservation Stats");
    assert!(sent[0].html.contains("<td>Nigeria</td><td>6</td>"));
}

#[tokio::test]
async fn test_report_send_failure_keeps_stats() {
    let repo = seeded_repo().await;
    let aggregator = Arc::new(StatsAggregator::new(Arc::new(repo), Arc::new(ManualClock::new(now()))));
    let reporter = StatsReporter::new(aggregator, Arc::new(RecordingMailer::failing()), "admin@example.com");

    let delivery = reporter.send_report().await.unwrap();
    assert!(!delivery.is_sent());
    assert_eq!(delivery.error.as_deref(), Some("SMTP connection refused"));
    assert_eq!(delivery.stats.verified_reservations, 7);
}
