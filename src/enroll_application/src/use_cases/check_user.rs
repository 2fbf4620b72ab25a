use enroll_core::{Email, IdentityStore, IdentityStoreError, UniqueId};

/// Error types specific to the check-user step
#[derive(Debug, thiserror::Error)]
pub enum CheckUserError {
    #[error("Identity store error: {0}")]
    IdentityStoreError(#[from] IdentityStoreError),
    #[error("User already registered")]
    AlreadyRegistered,
}

/// Check-user use case - the gate at the front of the registration flow.
///
/// Confirms the identity exists and has not completed registration, and
/// returns the contact address so the client can confirm the delivery
/// target before requesting a code.
pub struct CheckUserUseCase<S>
where
    S: IdentityStore,
{
    identity_store: S,
}

impl<S> CheckUserUseCase<S>
where
    S: IdentityStore,
{
    pub fn new(identity_store: S) -> Self {
        Self { identity_store }
    }

    #[tracing::instrument(name = "CheckUserUseCase::execute", skip(self))]
    pub async fn execute(&self, unique_id: &UniqueId) -> Result<Option<Email>, CheckUserError> {
        let record = self.identity_store.find_by_unique_id(unique_id).await?;

        if record.is_registered() {
            return Err(CheckUserError::AlreadyRegistered);
        }

        Ok(record.email().cloned())
    }
}
