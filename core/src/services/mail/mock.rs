//! Recording mail transport for service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::MailServiceTrait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.fail.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailServiceTrait for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("SMTP connection refused".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html_body.to_string(),
        });
        Ok(format!("<test-{}@localhost>", sent.len()))
    }
}
