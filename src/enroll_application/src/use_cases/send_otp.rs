use chrono::Utc;
use enroll_core::{Email, EmailClient, IdentityStore, IdentityStoreError, OtpCode, UniqueId};

pub const OTP_EMAIL_SUBJECT: &str = "OTP Verification";

/// Error types specific to the send-otp step
#[derive(Debug, thiserror::Error)]
pub enum SendOtpError {
    #[error("Identity store error: {0}")]
    IdentityStoreError(#[from] IdentityStoreError),
    #[error("User email not found")]
    MissingContact,
    #[error("Failed to send OTP: {0}")]
    DeliveryFailed(String),
}

/// Send-otp use case - issues a fresh code and hands it to the notifier.
///
/// The code is persisted before the delivery attempt. A failed delivery
/// therefore leaves a live (undelivered) code behind; the client retries
/// and the reissue overwrites it.
pub struct SendOtpUseCase<S, E>
where
    S: IdentityStore,
    E: EmailClient,
{
    identity_store: S,
    email_client: E,
}

impl<S, E> SendOtpUseCase<S, E>
where
    S: IdentityStore,
    E: EmailClient,
{
    pub fn new(identity_store: S, email_client: E) -> Self {
        Self {
            identity_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "SendOtpUseCase::execute", skip(self))]
    pub async fn execute(&self, unique_id: &UniqueId) -> Result<Email, SendOtpError> {
        let mut record = self.identity_store.find_by_unique_id(unique_id).await?;

        let Some(email) = record.email().cloned() else {
            return Err(SendOtpError::MissingContact);
        };

        let code = OtpCode::new();
        record.issue_otp(code.clone(), Utc::now());
        self.identity_store.update(&record).await?;

        self.email_client
            .send_email(&email, OTP_EMAIL_SUBJECT, &otp_email_body(&code))
            .await
            .map_err(SendOtpError::DeliveryFailed)?;

        Ok(email)
    }
}

fn otp_email_body(code: &OtpCode) -> String {
    format!(
        "<p>Your OTP is <b>{}</b>. It expires in 5 minutes.</p>",
        code.as_str()
    )
}
