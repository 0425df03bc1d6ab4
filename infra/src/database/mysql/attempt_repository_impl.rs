//! MySQL implementation of the AttemptRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use pr_core::domain::entities::VerificationAttempt;
use pr_core::errors::DomainError;
use pr_core::repositories::AttemptRepository;

use super::{column_error, parse_uuid, store_error};

/// MySQL implementation of AttemptRepository backed by `verification_attempts`
pub struct MySqlAttemptRepository {
    pool: MySqlPool,
}

impl MySqlAttemptRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_attempt(row: &sqlx::mysql::MySqlRow) -> Result<VerificationAttempt, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;

        Ok(VerificationAttempt {
            id: parse_uuid(&id)?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            ip_address: row.try_get("ip_address").map_err(|e| column_error("ip_address", e))?,
            attempts: row.try_get("attempts").map_err(|e| column_error("attempts", e))?,
            last_attempt: row
                .try_get::<DateTime<Utc>, _>("last_attempt")
                .map_err(|e| column_error("last_attempt", e))?,
            locked_until: row
                .try_get::<Option<DateTime<Utc>>, _>("locked_until")
                .map_err(|e| column_error("locked_until", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl AttemptRepository for MySqlAttemptRepository {
    async fn find_matching(
        &self,
        email: &str,
        ip_address: &str,
        created_after: DateTime<Utc>,
    ) -> Result<Option<VerificationAttempt>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, ip_address, attempts, last_attempt, locked_until,
                   created_at, updated_at
            FROM verification_attempts
            WHERE created_at > ? AND (email = ? OR ip_address = ?)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(created_after)
        .bind(email)
        .bind(ip_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find verification attempt", e))?;

        row.as_ref().map(Self::row_to_attempt).transpose()
    }

    async fn create(&self, attempt: VerificationAttempt) -> Result<VerificationAttempt, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO verification_attempts (
                id, email, ip_address, attempts, last_attempt, locked_until,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(attempt.id.to_string())
        .bind(&attempt.email)
        .bind(&attempt.ip_address)
        .bind(attempt.attempts)
        .bind(attempt.last_attempt)
        .bind(attempt.locked_until)
        .bind(attempt.created_at)
        .bind(attempt.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create verification attempt", e))?;

        Ok(attempt)
    }

    async fn update(&self, attempt: &VerificationAttempt) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE verification_attempts
            SET attempts = ?, last_attempt = ?, locked_until = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(attempt.attempts)
        .bind(attempt.last_attempt)
        .bind(attempt.locked_until)
        .bind(attempt.updated_at)
        .bind(attempt.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update verification attempt", e))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_attempts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete verification attempt", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_attempts WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to purge verification attempts", e))?;

        Ok(result.rows_affected())
    }
}
