use axum::{Json, extract::State, response::IntoResponse};
use enroll_application::VerifyOtpUseCase;
use enroll_core::{IdentityStore, OtpCode, UniqueId};
use serde::{Deserialize, Serialize};

use super::error::EnrollApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub unique_id: String,
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
}

#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp<S>(
    State(identity_store): State<S>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
{
    let unique_id = UniqueId::parse(request.unique_id)?;
    let submitted = OtpCode::parse(request.otp)?;

    let use_case = VerifyOtpUseCase::new(identity_store);
    use_case.execute(&unique_id, &submitted).await?;

    Ok(Json(VerifyOtpResponse {
        message: "OTP verified successfully".to_string(),
    }))
}
