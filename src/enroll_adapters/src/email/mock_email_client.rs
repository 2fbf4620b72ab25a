use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use enroll_core::{Email, EmailClient};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

/// A delivery recorded by the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Test double: records every delivery, and can be flipped into a
/// failing mode to exercise delivery-failure handling.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: Arc<AtomicBool>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("mock delivery failure".to_string());
        }

        let mut sent = self.sent.write().await;
        sent.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
