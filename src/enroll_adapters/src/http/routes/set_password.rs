use axum::{Json, extract::State, response::IntoResponse};
use enroll_application::SetPasswordUseCase;
use enroll_core::{AcceptAllPolicy, IdentityStore, Password, PasswordHasher, UniqueId};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::EnrollApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    pub unique_id: String,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct SetPasswordResponse {
    pub message: String,
}

#[tracing::instrument(name = "Set password", skip_all)]
pub async fn set_password<S, H>(
    State((identity_store, password_hasher)): State<(S, H)>,
    Json(request): Json<SetPasswordRequest>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let unique_id = UniqueId::parse(request.unique_id)?;
    let password = Password::try_from(request.password)?;

    let use_case = SetPasswordUseCase::new(identity_store, password_hasher, AcceptAllPolicy);
    use_case.execute(&unique_id, password).await?;

    Ok(Json(SetPasswordResponse {
        message: "Password created successfully, registration complete".to_string(),
    }))
}
