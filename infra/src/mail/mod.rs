//! Mail Service Module
//!
//! Transports behind the core `MailServiceTrait`:
//!
//! - **SMTP**: STARTTLS submission via lettre, authenticated with an app password
//! - **Mock**: Logs and records messages for development and tests
//! - **Unconfigured**: Fails every send; production stand-in when SMTP is unavailable
//!
//! Recipient addresses are masked in logs.

pub mod mock;
pub mod smtp;
pub mod unconfigured;

pub use mock::MockMailService;
pub use smtp::SmtpMailService;
pub use unconfigured::UnconfiguredMailService;

use std::sync::Arc;

use pr_core::services::MailServiceTrait;
use pr_shared::{Environment, MailConfig};


/// Create the mail transport for this configuration
///
/// Outside production a missing or broken SMTP setup falls back to the mock
/// transport. In production it yields a transport whose sends all fail.
pub fn create_mail_service(config: &MailConfig, environment: Environment) -> Arc<dyn MailServiceTrait> {
    if !config.is_configured() {
        return fallback(environment, "GMAIL_USER or GMAIL_APP_PASSWORD missing");
    }

    match SmtpMailService::new(config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!("Failed to initialize SMTP mail service: {}", e);
            fallback(environment, &e.to_string())
        }
    }
}

fn fallback(environment: Environment, reason: &str) -> Arc<dyn MailServiceTrait> {
    if environment.is_production() {
        tracing::error!(reason = reason, "Mail transport unavailable, outbound email disabled");
        Arc::new(UnconfiguredMailService::new(reason))
    } else {
        tracing::warn!(reason = reason, "Mail transport unavailable, using mock mail service");
        Arc::new(MockMailService::new())
    }
}
