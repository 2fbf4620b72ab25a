use enroll_core::{Email, EmailClient};

/// Stand-in wired at startup when provider credentials are incomplete.
/// The service still boots and the other flows keep working; every send
/// fails with a diagnostic naming the absent keys.
#[derive(Debug, Clone)]
pub struct UnconfiguredEmailClient {
    missing: Vec<&'static str>,
}

impl UnconfiguredEmailClient {
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }
}

#[async_trait::async_trait]
impl EmailClient for UnconfiguredEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        _subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        let diagnostic = format!(
            "email provider not configured: {} not set",
            self.missing.join(", ")
        );
        tracing::error!(%diagnostic, "Refusing to send email");
        Err(diagnostic)
    }
}
