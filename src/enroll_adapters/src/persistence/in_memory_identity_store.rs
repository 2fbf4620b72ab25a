use std::collections::HashMap;
use std::sync::Arc;

use enroll_core::{
    ColumnInfo, IdentityRecord, IdentityStore, IdentityStoreError, IdentitySummary,
    StoreDiagnostics, UniqueId,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

const SAMPLE_LIMIT: usize = 5;

/// HashMap-backed store for tests and local development. Clones share
/// the underlying map, so a test can seed records and watch the service
/// mutate them.
#[derive(Default, Clone)]
pub struct InMemoryIdentityStore {
    records: Arc<RwLock<HashMap<String, IdentityRecord>>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a pre-provisioned identity. Provisioning is out of scope for
    /// the service itself, so only tests and fixtures call this.
    pub async fn provision(&self, record: IdentityRecord) {
        let mut records = self.records.write().await;
        records.insert(record.unique_id().as_str().to_string(), record);
    }

    pub async fn get(&self, unique_id: &str) -> Option<IdentityRecord> {
        self.records.read().await.get(unique_id).cloned()
    }
}

#[async_trait::async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_unique_id(
        &self,
        unique_id: &UniqueId,
    ) -> Result<IdentityRecord, IdentityStoreError> {
        let records = self.records.read().await;
        records
            .get(unique_id.as_str())
            .cloned()
            .ok_or(IdentityStoreError::IdentityNotFound)
    }

    async fn update(&self, record: &IdentityRecord) -> Result<(), IdentityStoreError> {
        let mut records = self.records.write().await;
        let key = record.unique_id().as_str().to_string();
        if !records.contains_key(&key) {
            return Err(IdentityStoreError::IdentityNotFound);
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, IdentityStoreError> {
        let records = self.records.read().await;

        let mut rows: Vec<&IdentityRecord> = records.values().collect();
        rows.sort_by_key(|record| record.id());

        let sample = rows
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|record| IdentitySummary {
                unique_id: record.unique_id().as_str().to_string(),
                full_name: record.full_name().to_string(),
                email: record
                    .email()
                    .map(|email| email.as_ref().expose_secret().clone()),
                is_registered: record.is_registered(),
            })
            .collect();

        Ok(StoreDiagnostics {
            connected: true,
            table_exists: true,
            identity_count: records.len() as i64,
            sample,
            columns: logical_columns(),
        })
    }
}

// Mirrors the relational schema so diagnostics look the same against
// either store.
fn logical_columns() -> Vec<ColumnInfo> {
    let schema: [(&str, &str, bool); 8] = [
        ("id", "bigint", false),
        ("unique_id", "text", false),
        ("full_name", "text", false),
        ("email", "text", true),
        ("password_hash", "text", true),
        ("is_registered", "boolean", false),
        ("otp_code", "text", true),
        ("otp_expires_at", "timestamp with time zone", true),
    ];
    schema.into_iter()
        .map(|(name, data_type, is_nullable)| ColumnInfo {
            name: name.to_string(),
            data_type: data_type.to_string(),
            is_nullable,
        })
        .collect()
}
