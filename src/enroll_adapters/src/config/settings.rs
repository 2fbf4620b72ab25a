use std::sync::LazyLock;
use std::time::Duration;

use axum::http::HeaderValue;
use enroll_core::SESSION_TTL_SECONDS;
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{defaults, env};

static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::from_env);

/// Process configuration, sourced from the environment (and a `.env`
/// file when present). Every field has a development default so the
/// service and its tests boot without a populated environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_app_address")]
    pub app_address: String,
    /// Gates diagnostic detail in error responses.
    #[serde(default)]
    pub production: bool,
    #[serde(default = "default_database_url")]
    pub database_url: Secret<String>,
    #[serde(default)]
    pub brevo_api_key: Option<Secret<String>>,
    #[serde(default = "default_brevo_base_url")]
    pub brevo_base_url: String,
    /// Sender address. Must be an address, not a display name.
    #[serde(default)]
    pub mail_from: Option<String>,
    #[serde(default)]
    pub mail_from_name: Option<String>,
    #[serde(default = "default_email_timeout_millis")]
    pub email_timeout_millis: u64,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: Secret<String>,
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,
    /// Comma-separated CORS origins. Unset disables the CORS layer.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

impl Settings {
    pub fn load() -> &'static Settings {
        &SETTINGS
    }

    fn from_env() -> Self {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .expect("Failed to build configuration")
            .try_deserialize()
            .expect("Failed to load configuration from environment")
    }

    pub fn email_timeout(&self) -> Duration {
        Duration::from_millis(self.email_timeout_millis)
    }

    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        self.allowed_origins
            .as_deref()
            .map(AllowedOrigins::parse)
            .filter(|origins| !origins.is_empty())
    }

    /// Which provider credentials are absent or unusable. Empty means
    /// the Brevo client can be constructed.
    pub fn email_missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.brevo_api_key.is_none() {
            missing.push(env::BREVO_API_KEY_ENV_VAR);
        }
        match self.mail_from.as_deref() {
            None => missing.push(env::MAIL_FROM_ENV_VAR),
            Some(sender) if !sender.contains('@') => {
                missing.push("MAIL_FROM (must be an email address, not a name)");
            }
            Some(_) => {}
        }
        missing
    }

    pub fn email_config_report(&self) -> EmailConfigReport {
        EmailConfigReport {
            brevo_api_key: presence(self.brevo_api_key.is_some()),
            mail_from: self.mail_from.clone(),
            mail_from_is_address: self
                .mail_from
                .as_deref()
                .is_some_and(|sender| sender.contains('@')),
            mail_from_name: self.mail_from_name.clone(),
        }
    }
}

fn presence(set: bool) -> String {
    if set { "set" } else { "missing" }.to_string()
}

/// Provider-configuration snapshot returned by the self-check endpoint.
/// Never includes the key itself.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfigReport {
    pub brevo_api_key: String,
    pub mail_from: Option<String>,
    pub mail_from_is_address: bool,
    pub mail_from_name: Option<String>,
}

/// CORS allow-list parsed from a comma-separated origin list.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_app_address() -> String {
    defaults::APP_ADDRESS.to_string()
}

fn default_database_url() -> Secret<String> {
    Secret::from(defaults::DEV_DATABASE_URL.to_string())
}

fn default_brevo_base_url() -> String {
    defaults::BREVO_BASE_URL.to_string()
}

fn default_email_timeout_millis() -> u64 {
    defaults::EMAIL_TIMEOUT.as_millis() as u64
}

fn default_jwt_secret() -> Secret<String> {
    Secret::from(defaults::DEV_JWT_SECRET.to_string())
}

fn default_token_ttl_seconds() -> i64 {
    SESSION_TTL_SECONDS
}
