use axum::{Json, extract::State, response::IntoResponse};
use enroll_core::{Email, EmailClient};
use secrecy::Secret;
use serde::Serialize;

use crate::config::{EmailConfigReport, Settings};

use super::error::EnrollApiError;

#[derive(Serialize)]
pub struct TestEmailResponse {
    pub message: String,
    pub config: EmailConfigReport,
    pub status: String,
}

/// Provider self-check: validates the configured credentials, then
/// sends a probe email to the sender's own address.
#[tracing::instrument(name = "Test email configuration", skip_all)]
pub async fn test_email<E>(
    State(email_client): State<E>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    E: EmailClient + Clone + 'static,
{
    let settings = Settings::load();

    let missing = settings.email_missing_keys();
    if !missing.is_empty() {
        return Err(EnrollApiError::ConfigMissing(missing.join(", ")));
    }

    let sender = settings.mail_from.clone().unwrap_or_default();
    let recipient = Email::parse(Secret::from(sender))
        .map_err(|e| EnrollApiError::UnexpectedError(e.to_string()))?;

    email_client
        .send_email(
            &recipient,
            "Brevo Test Email",
            "<p>Your Brevo integration works!</p>",
        )
        .await
        .map_err(EnrollApiError::DeliveryFailed)?;

    Ok(Json(TestEmailResponse {
        message: "Email provider configuration valid".to_string(),
        config: settings.email_config_report(),
        status: "ready".to_string(),
    }))
}
