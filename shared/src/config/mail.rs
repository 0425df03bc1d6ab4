//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMTP configuration for verification and report emails
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS)
    pub smtp_port: u16,

    /// Account identity, also used as the sender address
    pub username: Option<String>,

    /// Application credential for the account
    #[serde(skip_serializing)]
    pub app_password: Option<String>,

    /// Display name placed in the From header
    pub from_name: String,

    /// Connection and command timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 587,
            username: None,
            app_password: None,
            from_name: String::from("Phone Number Reservation"),
            timeout_secs: 10,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("app_password", &self.app_password.as_ref().map(|_| "<redacted>"))
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("SMTP_PORT", defaults.smtp_port),
            username: std::env::var("GMAIL_USER").ok().filter(|s| !s.is_empty()),
            app_password: std::env::var("GMAIL_APP_PASSWORD").ok().filter(|s| !s.is_empty()),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
            timeout_secs: env_or("SMTP_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }

    /// Both secrets are present
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.app_password.is_some()
    }
}
