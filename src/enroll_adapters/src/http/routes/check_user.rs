use axum::{Json, extract::State, response::IntoResponse};
use enroll_application::CheckUserUseCase;
use enroll_core::{IdentityStore, UniqueId};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::error::EnrollApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUserRequest {
    pub unique_id: String,
}

#[derive(Serialize)]
pub struct CheckUserResponse {
    pub message: String,
    pub email: Option<String>,
}

#[tracing::instrument(name = "Check user", skip_all)]
pub async fn check_user<S>(
    State(identity_store): State<S>,
    Json(request): Json<CheckUserRequest>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
{
    let unique_id = UniqueId::parse(request.unique_id)?;

    let use_case = CheckUserUseCase::new(identity_store);
    let email = use_case.execute(&unique_id).await?;

    Ok(Json(CheckUserResponse {
        message: "User found".to_string(),
        email: email.map(|email| email.as_ref().expose_secret().clone()),
    }))
}
