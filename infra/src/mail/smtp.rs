//! SMTP mail transport built on lettre's async tokio transport.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, error, info};
use uuid::Uuid;

use pr_core::services::MailServiceTrait;
use pr_shared::utils::email::mask_email;
use pr_shared::MailConfig;

use crate::InfrastructureError;

/// SMTP mail service
pub struct SmtpMailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    /// Domain part used when minting Message-ID headers
    message_id_domain: String,
}

impl SmtpMailService {
    /// Build an authenticated STARTTLS transport
    ///
    /// No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let (username, password) = match (&config.username, &config.app_password) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => {
                return Err(InfrastructureError::Config(
                    "GMAIL_USER and GMAIL_APP_PASSWORD must both be set".to_string(),
                ))
            }
        };

        let from = Self::sender(&config.from_name, &username)?;
        let message_id_domain = from.email.domain().to_string();

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Mail(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        info!(
            "SMTP mail service initialized for {}:{} as {}",
            config.smtp_host,
            config.smtp_port,
            mask_email(&from.email.to_string())
        );

        Ok(Self {
            transport,
            from,
            message_id_domain,
        })
    }

    /// Parse the From mailbox, e.g. `Phone Number Reservation <sender@gmail.com>`
    pub(crate) fn sender(from_name: &str, address: &str) -> Result<Mailbox, InfrastructureError> {
        let email = address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;
        Ok(Mailbox::new(Some(from_name.to_string()), email))
    }

    fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        message_id: &str,
    ) -> Result<Message, String> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build message: {}", e))
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailService {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.message_id_domain);
        let message = self.build_message(to, subject, html_body, &message_id)?;

        debug!("Sending '{}' to {}", subject, mask_email(to));

        match self.transport.send(message).await {
            Ok(response) => {
                info!(
                    "Email sent to {} (code {}), message id {}",
                    mask_email(to),
                    response.code(),
                    message_id
                );
                Ok(message_id)
            }
            Err(e) => {
                error!("Failed to send email to {}: {}", mask_email(to), e);
                Err(format!("SMTP send failed: {}", e))
            }
        }
    }
}
