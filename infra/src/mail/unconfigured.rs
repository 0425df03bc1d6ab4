//! Transport used in production when SMTP cannot be set up

use async_trait::async_trait;
use tracing::error;

use pr_core::services::MailServiceTrait;
use pr_shared::utils::email::mask_email;

/// Refuses every send so callers report the failure
#[derive(Debug, Clone)]
pub struct UnconfiguredMailService {
    reason: String,
}

impl UnconfiguredMailService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl MailServiceTrait for UnconfiguredMailService {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<String, String> {
        error!(
            to = %mask_email(to),
            subject = subject,
            reason = %self.reason,
            "Mail transport not configured, message dropped"
        );
        Err(format!("mail transport not configured: {}", self.reason))
    }
}
