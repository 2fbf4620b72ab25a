use axum::{Json, extract::State, response::IntoResponse};
use enroll_application::LoginUseCase;
use enroll_core::{IdentityStore, Password, PasswordHasher, TokenSigner, UniqueId};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::EnrollApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub unique_id: String,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub unique_id: String,
    pub full_name: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, H, G>(
    State((identity_store, password_hasher, token_signer)): State<(S, H, G)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    G: TokenSigner + Clone + 'static,
{
    let unique_id = UniqueId::parse(request.unique_id)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(identity_store, password_hasher, token_signer);
    let session = use_case.execute(&unique_id, password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
        user: LoginUser {
            unique_id: session.unique_id.as_str().to_string(),
            full_name: session.full_name,
        },
    }))
}
