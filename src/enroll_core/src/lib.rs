pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    identity::{IdentityError, IdentityRecord, OtpVerifyError},
    otp_code::{OTP_CODE_LENGTH, OTP_TTL_SECONDS, OtpCode, OtpCodeError},
    password::{Password, PasswordDigest, PasswordError},
    unique_id::{UniqueId, UniqueIdError},
};

pub use ports::{
    repositories::{
        ColumnInfo, IdentityStore, IdentityStoreError, IdentitySummary, StoreDiagnostics,
    },
    services::{
        AcceptAllPolicy, EmailClient, PasswordHasher, PasswordPolicy, SESSION_TTL_SECONDS,
        SessionClaims, TokenSigner,
    },
};
