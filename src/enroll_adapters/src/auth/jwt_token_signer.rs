use chrono::Utc;
use enroll_core::{SessionClaims, TokenSigner};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::Settings;

#[derive(Clone)]
pub struct JwtSignerConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

/// HMAC bearer-token signer. The claim set is fixed: the record's
/// surrogate id, its unique id, and the expiry.
#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtSignerConfig,
}

impl JwtTokenSigner {
    pub fn new(config: JwtSignerConfig) -> Self {
        Self { config }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(JwtSignerConfig {
            jwt_secret: settings.jwt_secret.clone(),
            token_ttl_in_seconds: settings.token_ttl_seconds,
        })
    }
}

impl TokenSigner for JwtTokenSigner {
    fn issue(&self, claims: &SessionClaims) -> Result<String, String> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds)
            .ok_or("Failed to create session token duration".to_string())?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or("Duration out of range".to_string())?
            .timestamp();

        // Cast exp to a usize, which is what the claims struct expects
        let exp: usize = exp
            .try_into()
            .map_err(|_| "Failed to cast i64 to usize".to_string())?;

        let token_claims = SessionTokenClaims {
            id: claims.id,
            unique_id: claims.unique_id.as_str().to_string(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &token_claims,
            &EncodingKey::from_secret(self.config.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| e.to_string())
    }
}

/// Decode and validate a session token. Used by downstream services and
/// the test suite; the registration service itself only mints.
pub fn decode_session_token(
    token: &str,
    secret: &[u8],
) -> Result<SessionTokenClaims, jsonwebtoken::errors::Error> {
    decode::<SessionTokenClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionTokenClaims {
    pub id: i64,
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    pub exp: usize,
}
