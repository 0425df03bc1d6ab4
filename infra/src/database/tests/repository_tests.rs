//! Round trips against a live MySQL instance. Run with
//! `DATABASE_URL=mysql://... cargo test -p pr_infra -- --ignored`.

use chrono::{Duration, Utc};
use uuid::Uuid;

use pr_core::domain::entities::{NewReservation, Photo, Reservation, VerificationAttempt};
use pr_core::errors::{ConflictField, DomainError, ReservationError};
use pr_core::repositories::{AttemptRepository, ReservationRepository};
use pr_shared::DatabaseConfig;

use crate::database::{DatabasePool, MySqlAttemptRepository, MySqlReservationRepository};

async fn pool() -> DatabasePool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = DatabasePool::new(DatabaseConfig {
        url,
        ..DatabaseConfig::default()
    })
    .await
    .unwrap();
    pool.run_migrations().await.unwrap();
    pool
}

fn unique_reservation(country: &str) -> Reservation {
    let tag = Uuid::new_v4().simple().to_string();
    let digits: String = tag.chars().filter(|c| c.is_ascii_digit()).chain("0000000000".chars()).take(10).collect();
    Reservation::new(
        NewReservation {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: format!("{}@gmail.com", tag),
            phone_number: format!("+1{}", digits),
            country: country.to_string(),
            photo: Photo {
                file_name: Some("me.png".to_string()),
                content_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            },
        },
        "123456".to_string(),
        Utc::now(),
    )
}

#[tokio::test]
#[ignore = "requires a running MySQL instance (DATABASE_URL)"]
async fn test_reservation_create_find_and_verify() {
    let pool = pool().await;
    let repo = MySqlReservationRepository::new(pool.get_pool().clone());
    let reservation = unique_reservation("Nigeria");

    repo.create(reservation.clone()).await.unwrap();

    let found = repo.find_by_email(&reservation.email).await.unwrap().unwrap();
    assert_eq!(found.id, reservation.id);
    assert_eq!(found.verification_code, "123456");
    assert!(!found.is_verified);
    assert!(repo.exists_by_phone(&reservation.phone_number).await.unwrap());
    assert!(repo.exists_by_email(&reservation.email).await.unwrap());

    assert!(repo.mark_verified(reservation.id, Utc::now()).await.unwrap());
    assert!(!repo.mark_verified(reservation.id, Utc::now()).await.unwrap());

    let verified = repo.find_by_email(&reservation.email).await.unwrap().unwrap();
    assert!(verified.is_verified);
    assert!(verified.verified_at.is_some());
}

#[tokio::test]
#[ignore = "requires a running MySQL instance (DATABASE_URL)"]
async fn test_reservation_duplicate_email_is_conflict() {
    let pool = pool().await;
    let repo = MySqlReservationRepository::new(pool.get_pool().clone());
    let first = unique_reservation("Ghana");
    repo.create(first.clone()).await.unwrap();

    let mut second = unique_reservation("Ghana");
    second.email = first.email.clone();

    let err = repo.create(second).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Reservation(ReservationError::Conflict {
            field: ConflictField::Email
        })
    ));
}

#[tokio::test]
#[ignore = "requires a running MySQL instance (DATABASE_URL)"]
async fn test_attempt_ledger_round_trip() {
    let pool = pool().await;
    let repo = MySqlAttemptRepository::new(pool.get_pool().clone());
    let now = Utc::now();
    let email = format!("{}@gmail.com", Uuid::new_v4().simple());
    let ip = format!("10.{}.0.1", now.timestamp_subsec_micros() % 250);

    let mut attempt = repo
        .create(VerificationAttempt::new(&email, &ip, now))
        .await
        .unwrap();
    attempt.record_failure(now, 5, Duration::minutes(30));
    repo.update(&attempt).await.unwrap();

    let by_email = repo
        .find_matching(&email, "203.0.113.99", now - Duration::hours(24))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, attempt.id);
    assert_eq!(by_email.attempts, 1);

    let stale = repo.find_matching(&email, &ip, now + Duration::seconds(1)).await.unwrap();
    assert!(stale.is_none());

    assert!(repo.delete(attempt.id).await.unwrap());
    assert!(!repo.delete(attempt.id).await.unwrap());
}
