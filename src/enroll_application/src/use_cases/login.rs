use enroll_core::{
    IdentityStore, IdentityStoreError, Password, PasswordHasher, SessionClaims, TokenSigner,
    UniqueId,
};

/// Successful authentication: a signed bearer token plus the minimal
/// profile fields the client renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub token: String,
    pub unique_id: UniqueId,
    pub full_name: String,
}

/// Error types specific to the login step
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Identity store error: {0}")]
    IdentityStoreError(#[from] IdentityStoreError),
    #[error("Invalid password")]
    IncorrectPassword,
    #[error("Failed to verify password: {0}")]
    HashingError(String),
    #[error("Failed to issue session token: {0}")]
    SigningError(String),
}

/// Login use case - the credentialed entry point, independent of the
/// registration flow. A record with no digest yet fails exactly like a
/// wrong password.
pub struct LoginUseCase<S, H, G>
where
    S: IdentityStore,
    H: PasswordHasher,
    G: TokenSigner,
{
    identity_store: S,
    password_hasher: H,
    token_signer: G,
}

impl<S, H, G> LoginUseCase<S, H, G>
where
    S: IdentityStore,
    H: PasswordHasher,
    G: TokenSigner,
{
    pub fn new(identity_store: S, password_hasher: H, token_signer: G) -> Self {
        Self {
            identity_store,
            password_hasher,
            token_signer,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        unique_id: &UniqueId,
        password: Password,
    ) -> Result<AuthenticatedSession, LoginError> {
        let record = self.identity_store.find_by_unique_id(unique_id).await?;

        let Some(digest) = record.password_digest() else {
            return Err(LoginError::IncorrectPassword);
        };

        let matches = self
            .password_hasher
            .verify(&password, digest)
            .await
            .map_err(LoginError::HashingError)?;
        if !matches {
            return Err(LoginError::IncorrectPassword);
        }

        let claims = SessionClaims {
            id: record.id(),
            unique_id: record.unique_id().clone(),
        };
        let token = self
            .token_signer
            .issue(&claims)
            .map_err(LoginError::SigningError)?;

        Ok(AuthenticatedSession {
            token,
            unique_id: record.unique_id().clone(),
            full_name: record.full_name().to_string(),
        })
    }
}
