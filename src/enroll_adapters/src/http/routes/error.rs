use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enroll_application::{
    CheckUserError, LoginError, SendOtpError, SetPasswordError, VerifyOtpError,
};
use enroll_core::{
    EmailError, IdentityStoreError, OtpCodeError, PasswordError, UniqueIdError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Error)]
pub enum EnrollApiError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired")]
    OtpExpired,

    #[error("User email not found")]
    MissingContact,

    #[error("Invalid password")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email provider configuration incomplete")]
    ConfigMissing(String),

    #[error("Failed to send OTP")]
    DeliveryFailed(String),

    #[error("Database unavailable")]
    StoreUnavailable(String),

    #[error("Server error")]
    UnexpectedError(String),
}

impl IntoResponse for EnrollApiError {
    fn into_response(self) -> Response {
        let error_message = self.to_string();
        let (status_code, detail) = match self {
            EnrollApiError::UserNotFound => (StatusCode::NOT_FOUND, None),

            EnrollApiError::AlreadyRegistered
            | EnrollApiError::InvalidOtp
            | EnrollApiError::OtpExpired
            | EnrollApiError::MissingContact
            | EnrollApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, None),

            EnrollApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, None),

            // Operator error: always name the absent keys.
            EnrollApiError::ConfigMissing(detail) => (StatusCode::BAD_REQUEST, Some(detail)),

            EnrollApiError::DeliveryFailed(detail)
            | EnrollApiError::StoreUnavailable(detail)
            | EnrollApiError::UnexpectedError(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, guard_detail(detail))
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            detail,
        });

        (status_code, body).into_response()
    }
}

// Internal diagnostics stay out of responses in production mode; they
// are still logged.
fn guard_detail(detail: String) -> Option<String> {
    tracing::error!(%detail, "Request failed");
    if Settings::load().production {
        None
    } else {
        Some(detail)
    }
}

impl From<UniqueIdError> for EnrollApiError {
    fn from(error: UniqueIdError) -> Self {
        EnrollApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for EnrollApiError {
    fn from(error: PasswordError) -> Self {
        EnrollApiError::InvalidInput(error.to_string())
    }
}

impl From<EmailError> for EnrollApiError {
    fn from(error: EmailError) -> Self {
        EnrollApiError::InvalidInput(error.to_string())
    }
}

impl From<OtpCodeError> for EnrollApiError {
    fn from(_: OtpCodeError) -> Self {
        // A code that is not six digits can never equal an issued one.
        EnrollApiError::InvalidOtp
    }
}

impl From<IdentityStoreError> for EnrollApiError {
    fn from(error: IdentityStoreError) -> Self {
        match error {
            IdentityStoreError::IdentityNotFound => EnrollApiError::UserNotFound,
            IdentityStoreError::StoreUnavailable(detail) => {
                EnrollApiError::StoreUnavailable(detail)
            }
            IdentityStoreError::UnexpectedError(detail) => EnrollApiError::UnexpectedError(detail),
        }
    }
}

impl From<CheckUserError> for EnrollApiError {
    fn from(error: CheckUserError) -> Self {
        match error {
            CheckUserError::IdentityStoreError(e) => e.into(),
            CheckUserError::AlreadyRegistered => EnrollApiError::AlreadyRegistered,
        }
    }
}

impl From<SendOtpError> for EnrollApiError {
    fn from(error: SendOtpError) -> Self {
        match error {
            SendOtpError::IdentityStoreError(e) => e.into(),
            SendOtpError::MissingContact => EnrollApiError::MissingContact,
            SendOtpError::DeliveryFailed(detail) => EnrollApiError::DeliveryFailed(detail),
        }
    }
}

impl From<VerifyOtpError> for EnrollApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::IdentityStoreError(e) => e.into(),
            VerifyOtpError::InvalidCode => EnrollApiError::InvalidOtp,
            VerifyOtpError::ExpiredCode => EnrollApiError::OtpExpired,
        }
    }
}

impl From<SetPasswordError> for EnrollApiError {
    fn from(error: SetPasswordError) -> Self {
        match error {
            SetPasswordError::IdentityStoreError(e) => e.into(),
            SetPasswordError::PolicyViolation(detail) => EnrollApiError::InvalidInput(detail),
            SetPasswordError::HashingError(detail) => EnrollApiError::UnexpectedError(detail),
        }
    }
}

impl From<LoginError> for EnrollApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::IdentityStoreError(e) => e.into(),
            LoginError::IncorrectPassword => EnrollApiError::Unauthenticated,
            LoginError::HashingError(detail) | LoginError::SigningError(detail) => {
                EnrollApiError::UnexpectedError(detail)
            }
        }
    }
}
