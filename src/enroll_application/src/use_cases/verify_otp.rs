use chrono::Utc;
use enroll_core::{IdentityStore, IdentityStoreError, OtpCode, OtpVerifyError, UniqueId};

/// Error types specific to the verify-otp step
#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("Identity store error: {0}")]
    IdentityStoreError(#[from] IdentityStoreError),
    #[error("Invalid OTP")]
    InvalidCode,
    #[error("OTP expired")]
    ExpiredCode,
}

impl From<OtpVerifyError> for VerifyOtpError {
    fn from(error: OtpVerifyError) -> Self {
        match error {
            OtpVerifyError::Mismatch => VerifyOtpError::InvalidCode,
            OtpVerifyError::Expired => VerifyOtpError::ExpiredCode,
        }
    }
}

/// Verify-otp use case - checks a submitted code against the stored slot.
///
/// Read-only on purpose: the code is not burned here, so the client can
/// re-verify. The slot is retired only when the password lands.
pub struct VerifyOtpUseCase<S>
where
    S: IdentityStore,
{
    identity_store: S,
}

impl<S> VerifyOtpUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(identity_store: S) -> Self {
        Self { identity_store }
    }

    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip(self, submitted))]
    pub async fn execute(
        &self,
        unique_id: &UniqueId,
        submitted: &OtpCode,
    ) -> Result<(), VerifyOtpError> {
        let record = self.identity_store.find_by_unique_id(unique_id).await?;

        record.verify_otp(submitted, Utc::now())?;

        Ok(())
    }
}
