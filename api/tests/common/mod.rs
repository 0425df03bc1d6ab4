//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

use pr_api::AppState;
use pr_core::domain::{NewReservation, Photo, Reservation};
use pr_core::repositories::{InMemoryAttemptRepository, InMemoryReservationRepository};
use pr_core::services::{Clock, ManualClock};
use pr_infra::mail::MockMailService;
use pr_shared::AppConfig;

/// PNG signature, base64 encoded
pub const PHOTO_BASE64: &str = "iVBORw0KGgo=";

pub struct TestContext {
    pub reservations: InMemoryReservationRepository,
    pub attempts: InMemoryAttemptRepository,
    pub mailer: MockMailService,
    pub clock: ManualClock,
    pub config: AppConfig,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_admin_secret(secret: &str) -> Self {
        let mut config = AppConfig::default();
        config.server.admin_secret = Some(secret.to_string());
        Self::with_config(config)
    }

    pub fn with_config(mut config: AppConfig) -> Self {
        config.report.recipient = "stats@gmail.com".to_string();

        let reservations = InMemoryReservationRepository::new();
        let attempts = InMemoryAttemptRepository::new();
        let mailer = MockMailService::new();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap());

        let state = web::Data::new(AppState::new(
            Arc::new(reservations.clone()),
            Arc::new(attempts.clone()),
            Arc::new(mailer.clone()),
            Arc::new(clock.clone()),
            &config,
        ));

        Self {
            reservations,
            attempts,
            mailer,
            clock,
            config,
            state,
        }
    }

    /// Stored verification code for an email
    pub async fn code_for(&self, email: &str) -> String {
        self.reservations
            .all()
            .await
            .into_iter()
            .find(|r| r.email == email)
            .map(|r| r.verification_code)
            .expect("reservation should exist")
    }

    /// Insert a reservation directly into the store
    pub async fn seed(&self, index: usize, country: &str, verified: bool) {
        let mut reservation = Reservation::new(
            NewReservation {
                first_name: format!("First{}", index),
                last_name: format!("Last{}", index),
                email: format!("seed{}@gmail.com", index),
                phone_number: format!("+1555000{:04}", index),
                country: country.to_string(),
                photo: Photo {
                    file_name: None,
                    content_type: "image/png".to_string(),
                    data: vec![0x89, 0x50],
                },
            },
            "123456".to_string(),
            self.clock.now(),
        );
        if verified {
            reservation.mark_verified(self.clock.now());
        }
        self.reservations.insert_raw(reservation).await;
    }
}

pub fn reserve_body(email: &str, phone: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Obi",
        "email": email,
        "phoneNumber": phone,
        "country": "Nigeria",
        "photo": {
            "fileName": "ada.png",
            "contentType": "image/png",
            "data": PHOTO_BASE64
        }
    })
}
