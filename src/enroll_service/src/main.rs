use std::sync::Arc;

use enroll_adapters::{
    auth::{Argon2PasswordHasher, JwtTokenSigner},
    config::Settings,
    email::{BrevoEmailClient, UnconfiguredEmailClient},
    persistence::PostgresIdentityStore,
};
use enroll_core::EmailClient;
use enroll_service::{EnrollService, configure_postgresql};
use reqwest::Client as HttpClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration (reads .env when present)
    let settings = Settings::load();

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql().await;
    let identity_store = PostgresIdentityStore::new(pg_pool);

    // Create the email client; the notifier call carries a bounded
    // timeout so a hung provider cannot hang requests.
    let http_client = HttpClient::builder()
        .timeout(settings.email_timeout())
        .build()?;

    let email_client: Arc<dyn EmailClient> =
        match BrevoEmailClient::from_settings(settings, http_client) {
            Ok(client) => Arc::new(client),
            Err(missing) => {
                tracing::warn!(
                    missing = %missing.join(", "),
                    "Email provider not configured; OTP delivery will fail until it is"
                );
                Arc::new(UnconfiguredEmailClient::new(missing))
            }
        };

    // Create the hashing and signing collaborators
    let password_hasher = Argon2PasswordHasher::new();
    let token_signer = JwtTokenSigner::from_settings(settings);

    let service = EnrollService::new(identity_store, email_client, password_hasher, token_signer);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.app_address).await?;
    service.run(listener, settings.allowed_origins()).await?;

    Ok(())
}
