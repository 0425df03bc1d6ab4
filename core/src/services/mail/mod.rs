//! Outbound email: transport trait and message rendering

mod diagnostics;
mod templates;

#[cfg(test)]
pub(crate) mod mock;

pub use diagnostics::{MailDiagnostics, SampleEmail, SAMPLE_CODE};
pub use templates::{escape_html, render_stats_email, render_verification_email, EmailContent};

use async_trait::async_trait;

/// Trait for email transport integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send an HTML email, returning the transport's message id
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String>;
}
