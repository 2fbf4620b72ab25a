use axum::{Json, extract::State, response::IntoResponse};
use enroll_application::SendOtpUseCase;
use enroll_core::{EmailClient, IdentityStore, UniqueId};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::error::EnrollApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    pub unique_id: String,
}

#[derive(Serialize)]
pub struct SendOtpResponse {
    pub message: String,
    pub email: String,
}

#[tracing::instrument(name = "Send OTP", skip_all)]
pub async fn send_otp<S, E>(
    State((identity_store, email_client)): State<(S, E)>,
    Json(request): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let unique_id = UniqueId::parse(request.unique_id)?;

    let use_case = SendOtpUseCase::new(identity_store, email_client);
    let email = use_case.execute(&unique_id).await?;

    Ok(Json(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        email: email.as_ref().expose_secret().clone(),
    }))
}
