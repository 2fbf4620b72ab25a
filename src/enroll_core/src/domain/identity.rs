use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp_code::{OTP_TTL_SECONDS, OtpCode},
    password::PasswordDigest,
    unique_id::UniqueId,
};

/// The sole persistent entity: one pre-provisioned record per identity.
///
/// Invariants, enforced at rehydration and preserved by the transition
/// methods:
/// - `is_registered` exactly when a password digest is stored
/// - OTP code and expiry are set together or not at all
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRecord {
    id: i64,
    unique_id: UniqueId,
    full_name: String,
    email: Option<Email>,
    password_digest: Option<PasswordDigest>,
    is_registered: bool,
    otp_code: Option<OtpCode>,
    otp_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("registration flag does not match stored digest")]
    RegistrationStateMismatch,
    #[error("OTP code and expiry must be set together")]
    OtpSlotMismatch,
}

/// Outcome of checking a submitted code against the stored slot.
/// Read-only: a successful check does not burn the code (it stays valid
/// until expiry or password set).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpVerifyError {
    #[error("Invalid OTP")]
    Mismatch,
    #[error("OTP expired")]
    Expired,
}

impl IdentityRecord {
    /// A freshly provisioned identity: no password, no live OTP.
    pub fn provisioned(id: i64, unique_id: UniqueId, full_name: String, email: Option<Email>) -> Self {
        Self {
            id,
            unique_id,
            full_name,
            email,
            password_digest: None,
            is_registered: false,
            otp_code: None,
            otp_expires_at: None,
        }
    }

    /// Rehydrate a record from storage, checking the state invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: i64,
        unique_id: UniqueId,
        full_name: String,
        email: Option<Email>,
        password_digest: Option<PasswordDigest>,
        is_registered: bool,
        otp_code: Option<OtpCode>,
        otp_expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, IdentityError> {
        if is_registered != password_digest.is_some() {
            return Err(IdentityError::RegistrationStateMismatch);
        }
        if otp_code.is_some() != otp_expires_at.is_some() {
            return Err(IdentityError::OtpSlotMismatch);
        }
        Ok(Self {
            id,
            unique_id,
            full_name,
            email,
            password_digest,
            is_registered,
            otp_code,
            otp_expires_at,
        })
    }

    /// Place a code in the single OTP slot, overwriting (and thereby
    /// invalidating) any previous one. Expiry is `now` + 5 minutes.
    pub fn issue_otp(&mut self, code: OtpCode, now: DateTime<Utc>) {
        self.otp_code = Some(code);
        self.otp_expires_at = Some(now + Duration::seconds(OTP_TTL_SECONDS));
    }

    /// Check a submitted code. Mismatch is reported before expiry, and a
    /// record with no live OTP can never match.
    pub fn verify_otp(&self, submitted: &OtpCode, now: DateTime<Utc>) -> Result<(), OtpVerifyError> {
        let (Some(code), Some(expires_at)) = (&self.otp_code, self.otp_expires_at) else {
            return Err(OtpVerifyError::Mismatch);
        };
        if submitted != code {
            return Err(OtpVerifyError::Mismatch);
        }
        if now > expires_at {
            return Err(OtpVerifyError::Expired);
        }
        Ok(())
    }

    /// Bind the password digest and retire the OTP slot. This is the only
    /// transition that clears OTP state, and `is_registered` never
    /// reverts afterwards.
    pub fn bind_password(&mut self, digest: PasswordDigest) {
        self.password_digest = Some(digest);
        self.is_registered = true;
        self.otp_code = None;
        self.otp_expires_at = None;
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn password_digest(&self) -> Option<&PasswordDigest> {
        self.password_digest.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.is_registered
    }

    pub fn otp_code(&self) -> Option<&OtpCode> {
        self.otp_code.as_ref()
    }

    pub fn otp_expires_at(&self) -> Option<DateTime<Utc>> {
        self.otp_expires_at
    }
}
