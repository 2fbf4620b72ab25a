use rand::Rng;
use thiserror::Error;

pub const OTP_CODE_LENGTH: usize = 6;

/// Issued codes are valid for five minutes, wall clock, no grace window.
pub const OTP_TTL_SECONDS: i64 = 5 * 60;

/// Six-digit one-time code. Digits only; comparison is exact string
/// equality with no normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpCodeError {
    #[error("OTP must be a {OTP_CODE_LENGTH}-digit code")]
    Malformed,
}

impl OtpCode {
    /// Generate a fresh code, each digit drawn uniformly.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let code = (0..OTP_CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(code)
    }

    /// Validate a client-submitted code. Anything that is not exactly
    /// six ASCII digits can never match an issued code.
    pub fn parse(raw: String) -> Result<Self, OtpCodeError> {
        if raw.len() == OTP_CODE_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw))
        } else {
            Err(OtpCodeError::Malformed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OtpCode {
    fn default() -> Self {
        Self::new()
    }
}
