//! Mock mail service for development and testing

use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use tracing::info;
use uuid::Uuid;

use pr_core::services::MailServiceTrait;
use pr_shared::utils::email::mask_email;

/// A message captured by [`MockMailService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail service that logs instead of sending
///
/// Clones share the same outbox, so a test can keep one handle while the
/// services own another.
#[derive(Clone, Default)]
pub struct MockMailService {
    outbox: Arc<Mutex<Vec<SentEmail>>>,
    message_count: Arc<AtomicUsize>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockMailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> usize {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Snapshot of everything sent so far
    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Most recent message to `to`, if any
    pub fn last_sent_to(&self, to: &str) -> Option<SentEmail> {
        self.sent().into_iter().rev().find(|mail| mail.to == to)
    }

    pub fn reset(&self) {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        self.message_count.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("Mock mail service failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        info!(
            "[MOCK MAIL] To: {}, Subject: {}, Message ID: {}",
            mask_email(to),
            subject,
            message_id
        );

        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentEmail {
                message_id: message_id.clone(),
                to: to.to_string(),
                subject: subject.to_string(),
                html_body: html_body.to_string(),
            });
        self.message_count.fetch_add(1, Ordering::SeqCst);

        Ok(message_id)
    }
}
