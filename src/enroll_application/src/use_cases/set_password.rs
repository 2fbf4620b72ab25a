use enroll_core::{
    IdentityStore, IdentityStoreError, Password, PasswordHasher, PasswordPolicy, UniqueId,
};

/// Error types specific to the set-password step
#[derive(Debug, thiserror::Error)]
pub enum SetPasswordError {
    #[error("Identity store error: {0}")]
    IdentityStoreError(#[from] IdentityStoreError),
    #[error("Password rejected: {0}")]
    PolicyViolation(String),
    #[error("Failed to hash password: {0}")]
    HashingError(String),
}

/// Set-password use case - completes registration by binding a digest.
///
/// This is the only point where the OTP slot is retired. It does not
/// re-check OTP verification state: the prior verify step is trusted to
/// have gated the client (existing behavior, kept as-is).
pub struct SetPasswordUseCase<S, H, P>
where
    S: IdentityStore,
    H: PasswordHasher,
    P: PasswordPolicy,
{
    identity_store: S,
    password_hasher: H,
    password_policy: P,
}

impl<S, H, P> SetPasswordUseCase<S, H, P>
where
    S: IdentityStore,
    H: PasswordHasher,
    P: PasswordPolicy,
{
    pub fn new(identity_store: S, password_hasher: H, password_policy: P) -> Self {
        Self {
            identity_store,
            password_hasher,
            password_policy,
        }
    }

    #[tracing::instrument(name = "SetPasswordUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        unique_id: &UniqueId,
        password: Password,
    ) -> Result<(), SetPasswordError> {
        self.password_policy
            .check(&password)
            .map_err(SetPasswordError::PolicyViolation)?;

        let mut record = self.identity_store.find_by_unique_id(unique_id).await?;

        let digest = self
            .password_hasher
            .hash(&password)
            .await
            .map_err(SetPasswordError::HashingError)?;

        record.bind_password(digest);
        self.identity_store.update(&record).await?;

        Ok(())
    }
}
