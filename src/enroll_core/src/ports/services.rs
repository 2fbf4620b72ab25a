use async_trait::async_trait;

use crate::domain::{
    email::Email,
    password::{Password, PasswordDigest},
    unique_id::UniqueId,
};

/// Port trait for email delivery. Adapters collapse every transport,
/// auth, or validation failure into `Err(diagnostic)` and log it; they
/// never panic into the caller. Callers treat any `Err` as one opaque
/// delivery-failure condition.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

// The concrete provider is picked from configuration at startup, so
// callers hold the client behind an Arc handle.
#[async_trait]
impl<T> EmailClient for std::sync::Arc<T>
where
    T: EmailClient + ?Sized,
{
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        (**self).send_email(recipient, subject, content).await
    }
}

/// Port trait for the password-hashing primitive. Black box: the core
/// only ever stores and forwards the digest.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, String>;
    async fn verify(&self, password: &Password, digest: &PasswordDigest)
    -> Result<bool, String>;
}

/// Bearer tokens carry exactly these claims and a fixed two-hour expiry.
pub const SESSION_TTL_SECONDS: i64 = 2 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub id: i64,
    pub unique_id: UniqueId,
}

/// Port trait for the bearer-token signer.
pub trait TokenSigner: Send + Sync {
    fn issue(&self, claims: &SessionClaims) -> Result<String, String>;
}

/// Pluggable password-acceptance hook. The core itself imposes no
/// length or complexity rules.
pub trait PasswordPolicy: Send + Sync {
    fn check(&self, password: &Password) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllPolicy;

impl PasswordPolicy for AcceptAllPolicy {
    fn check(&self, _password: &Password) -> Result<(), String> {
        Ok(())
    }
}
