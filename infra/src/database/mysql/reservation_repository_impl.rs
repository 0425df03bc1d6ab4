//! MySQL implementation of the ReservationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pr_core::domain::entities::{CountryCount, Reservation};
use pr_core::errors::{ConflictField, DomainError, ReservationError};
use pr_core::repositories::ReservationRepository;

use super::{column_error, parse_uuid, store_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, email, phone_number, country,
           photo_url, photo_file_name, verification_code, is_verified,
           verified_at, created_at, updated_at
    FROM phone_reservations
"#;

/// MySQL implementation of ReservationRepository
///
/// Stores reservations in the `phone_reservations` table, whose unique
/// keys on `email` and `phone_number` back the conflict checks.
pub struct MySqlReservationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Reservation entity
    fn row_to_reservation(row: &sqlx::mysql::MySqlRow) -> Result<Reservation, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(Reservation {
            id: parse_uuid(&id)?,
            first_name: row.try_get("first_name").map_err(|e| column_error("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| column_error("last_name", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            country: row.try_get("country").map_err(|e| column_error("country", e))?,
            photo_url: row.try_get("photo_url").map_err(|e| column_error("photo_url", e))?,
            photo_file_name: row
                .try_get("photo_file_name")
                .map_err(|e| column_error("photo_file_name", e))?,
            verification_code: row
                .try_get("verification_code")
                .map_err(|e| column_error("verification_code", e))?,
            is_verified: row.try_get("is_verified").map_err(|e| column_error("is_verified", e))?,
            verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("verified_at")
                .map_err(|e| column_error("verified_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    /// Unique-key violations become the same Conflict the pre-insert check reports
    fn map_insert_error(e: sqlx::Error) -> DomainError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                let field = if db_err.message().contains("phone_number") {
                    ConflictField::PhoneNumber
                } else {
                    ConflictField::Email
                };
                return ReservationError::Conflict { field }.into();
            }
        }
        store_error("Failed to create reservation", e)
    }

    async fn count(&self, query: &str, context: &str) -> Result<u64, DomainError> {
        let row = sqlx::query(query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(context, e))?;
        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total.max(0) as u64)
    }
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Reservation>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find reservation by email", e))?;

        row.as_ref().map(Self::row_to_reservation).transpose()
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM phone_reservations WHERE phone_number = ?) AS found")
            .bind(phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to check phone number", e))?;

        let found: i64 = row.try_get("found").map_err(|e| column_error("found", e))?;
        Ok(found != 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM phone_reservations WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to check email", e))?;

        let found: i64 = row.try_get("found").map_err(|e| column_error("found", e))?;
        Ok(found != 0)
    }

    async fn create(&self, reservation: Reservation) -> Result<Reservation, DomainError> {
        let query = r#"
            INSERT INTO phone_reservations (
                id, first_name, last_name, email, phone_number, country,
                photo_url, photo_file_name, verification_code, is_verified,
                verified_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(reservation.id.to_string())
            .bind(&reservation.first_name)
            .bind(&reservation.last_name)
            .bind(&reservation.email)
            .bind(&reservation.phone_number)
            .bind(&reservation.country)
            .bind(&reservation.photo_url)
            .bind(&reservation.photo_file_name)
            .bind(&reservation.verification_code)
            .bind(reservation.is_verified)
            .bind(reservation.verified_at)
            .bind(reservation.created_at)
            .bind(reservation.updated_at)
            .execute(&self.pool)
            .await
            .map_err(Self::map_insert_error)?;

        Ok(reservation)
    }

    async fn mark_verified(&self, id: Uuid, verified_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE phone_reservations
            SET is_verified = TRUE, verified_at = ?, updated_at = ?
            WHERE id = ? AND is_verified = FALSE
            "#,
        )
        .bind(verified_at)
        .bind(verified_at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to mark reservation verified", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn count_all(&self) -> Result<u64, DomainError> {
        self.count(
            "SELECT COUNT(*) AS total FROM phone_reservations",
            "Failed to count reservations",
        )
        .await
    }

    async fn count_verified(&self) -> Result<u64, DomainError> {
        self.count(
            "SELECT COUNT(*) AS total FROM phone_reservations WHERE is_verified = TRUE",
            "Failed to count verified reservations",
        )
        .await
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM phone_reservations WHERE created_at >= ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Failed to count recent reservations", e))?;

        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total.max(0) as u64)
    }

    async fn top_countries(&self, limit: usize) -> Result<Vec<CountryCount>, DomainError> {
        // Ties fall back to the country's first reservation
        let rows = sqlx::query(
            r#"
            SELECT country, COUNT(*) AS total, MIN(created_at) AS first_seen
            FROM phone_reservations
            GROUP BY country
            ORDER BY total DESC, first_seen ASC
            LIMIT ?
            "#,
        )
        .bind(limit as u64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to aggregate countries", e))?;

        rows.iter()
            .map(|row| {
                let country: String = row.try_get("country").map_err(|e| column_error("country", e))?;
                let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
                Ok(CountryCount::new(country, total.max(0) as u64))
            })
            .collect()
    }
}
