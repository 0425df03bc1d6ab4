//! Sample messages for checking the mail transport end to end

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{CountryCount, ReservationStats};
use crate::errors::{DomainError, DomainResult};
use crate::services::clock::Clock;

use super::templates::{render_stats_email, render_verification_email};
use super::MailServiceTrait;

/// Code shown in the sample verification email
pub const SAMPLE_CODE: &str = "123456";

/// Which template a sample send exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEmail {
    Verification,
    Stats,
}

impl FromStr for SampleEmail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(SampleEmail::Verification),
            "stats" => Ok(SampleEmail::Stats),
            other => Err(format!("unknown sample email type: {}", other)),
        }
    }
}

/// Sends fixture-filled emails through the live transport
pub struct MailDiagnostics {
    mailer: Arc<dyn MailServiceTrait>,
    clock: Arc<dyn Clock>,
    code_validity_hours: i64,
}

impl MailDiagnostics {
    pub fn new(mailer: Arc<dyn MailServiceTrait>, clock: Arc<dyn Clock>, code_validity_hours: i64) -> Self {
        Self {
            mailer,
            clock,
            code_validity_hours,
        }
    }

    /// Render and send one sample
    ///
    /// # Returns
    /// * `Ok(message_id)` - Transport accepted the message
    /// * `Err(DomainError::DependencyUnavailable)` - Transport refused it
    pub async fn send_sample(&self, kind: SampleEmail, to: &str, first_name: &str) -> DomainResult<String> {
        let content = match kind {
            SampleEmail::Verification => {
                render_verification_email(first_name, SAMPLE_CODE, self.code_validity_hours)
            }
            SampleEmail::Stats => render_stats_email(&self.sample_stats()),
        };

        let message_id = self
            .mailer
            .send(to, &content.subject, &content.html)
            .await
            .map_err(|e| {
                tracing::error!(kind = ?kind, error = %e, event = "sample_email_failed", "Sample email failed");
                DomainError::mail(e)
            })?;

        tracing::info!(kind = ?kind, message_id = %message_id, event = "sample_email_sent", "Sample email sent");
        Ok(message_id)
    }

    fn sample_stats(&self) -> ReservationStats {
        ReservationStats {
            total_reservations: 10,
            verified_reservations: 5,
            unverified_reservations: 5,
            reservations_last_2_hours: 2,
            top_countries: vec![
                CountryCount::new("Nigeria", 5),
                CountryCount::new("United States", 3),
                CountryCount::new("United Kingdom", 2),
            ],
            generated_at: self.clock.now(),
        }
    }
}
