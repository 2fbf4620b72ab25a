use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Duration, Utc};
use enroll_adapters::auth::{Argon2PasswordHasher, JwtSignerConfig, JwtTokenSigner};
use enroll_adapters::email::MockEmailClient;
use enroll_adapters::persistence::InMemoryIdentityStore;
use enroll_core::{Email, IdentityRecord, OTP_TTL_SECONDS, SESSION_TTL_SECONDS, UniqueId};
use enroll_service::EnrollService;
use secrecy::Secret;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub identity_store: InMemoryIdentityStore,
    pub email_client: MockEmailClient,
}

pub async fn spawn_app() -> TestApp {
    let identity_store = InMemoryIdentityStore::new();
    let email_client = MockEmailClient::new();
    let password_hasher = Argon2PasswordHasher::new();
    let token_signer = JwtTokenSigner::new(JwtSignerConfig {
        jwt_secret: Secret::from(TEST_JWT_SECRET.to_string()),
        token_ttl_in_seconds: SESSION_TTL_SECONDS,
    });

    let service = EnrollService::new(
        identity_store.clone(),
        email_client.clone(),
        password_hasher,
        token_signer,
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(service.run(listener, None));

    TestApp {
        address,
        http_client: reqwest::Client::new(),
        identity_store,
        email_client,
    }
}

impl TestApp {
    /// Seed a pre-provisioned identity, the way the out-of-scope
    /// provisioning system would.
    pub async fn provision(&self, unique_id: &str, full_name: &str, email: Option<&str>) -> i64 {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let email = email.map(|addr| Email::parse(Secret::from(addr.to_string())).unwrap());
        let record = IdentityRecord::provisioned(
            id,
            UniqueId::parse(unique_id.to_string()).unwrap(),
            full_name.to_string(),
            email,
        );
        self.identity_store.provision(record).await;
        id
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// The code carried by the most recent delivery.
    pub async fn last_sent_otp(&self) -> String {
        let sent = self.email_client.sent().await;
        let last = sent.last().expect("no email was sent");
        extract_otp(&last.content)
    }

    /// Rewind the stored OTP's expiry so it reads as already expired.
    pub async fn expire_current_otp(&self, unique_id: &str) {
        let mut record = self
            .identity_store
            .get(unique_id)
            .await
            .expect("identity not provisioned");
        let code = record.otp_code().expect("no live OTP").clone();
        record.issue_otp(code, Utc::now() - Duration::seconds(OTP_TTL_SECONDS + 1));
        self.identity_store.provision(record).await;
    }
}

pub fn extract_otp(content: &str) -> String {
    let start = content.find("<b>").expect("OTP email body changed") + 3;
    let end = content.find("</b>").expect("OTP email body changed");
    content[start..end].to_string()
}
