//! Stats report delivery

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::entities::ReservationStats;
use crate::errors::DomainResult;
use crate::services::mail::{render_stats_email, MailServiceTrait};

use super::aggregator::StatsAggregator;

/// Outcome of one report dispatch
#[derive(Debug, Clone)]
pub struct ReportDelivery {
    pub stats: ReservationStats,
    pub recipient: String,
    /// Transport message id when the send succeeded
    pub message_id: Option<String>,
    /// Transport error when the send failed
    pub error: Option<String>,
}

impl ReportDelivery {
    pub fn is_sent(&self) -> bool {
        self.message_id.is_some()
    }
}

/// Aggregates stats and emails them to the configured recipient
pub struct StatsReporter {
    aggregator: Arc<StatsAggregator>,
    mailer: Arc<dyn MailServiceTrait>,
    recipient: String,
}

impl StatsReporter {
    pub fn new(
        aggregator: Arc<StatsAggregator>,
        mailer: Arc<dyn MailServiceTrait>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            aggregator,
            mailer,
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Aggregate and send one report
    ///
    /// # Returns
    /// * `Ok(ReportDelivery)` - Stats were computed; check `is_sent()` for the mail outcome
    /// * `Err(DomainError)` - Aggregation failed, nothing was sent
    pub async fn send_report(&self) -> DomainResult<ReportDelivery> {
        let stats = self.aggregator.collect().await?;
        let content = render_stats_email(&stats);

        let delivery = match self
            .mailer
            .send(&self.recipient, &content.subject, &content.html)
            .await
        {
            Ok(message_id) => {
                info!(
                    recipient = %self.recipient,
                    message_id = %message_id,
                    total = stats.total_reservations,
                    verified = stats.verified_reservations,
                    event = "stats_report_sent",
                    "Stats report sent"
                );
                ReportDelivery {
                    stats,
                    recipient: self.recipient.clone(),
                    message_id: Some(message_id),
                    error: None,
                }
            }
            Err(e) => {
                error!(
                    recipient = %self.recipient,
                    error = %e,
                    event = "stats_report_failed",
                    "Failed to send stats report"
                );
                ReportDelivery {
                    stats,
                    recipient: self.recipient.clone(),
                    message_id: None,
                    error: Some(e),
                }
            }
        };

        Ok(delivery)
    }
}
