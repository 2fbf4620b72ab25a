use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{identity::IdentityRecord, unique_id::UniqueId};

// IdentityStore port trait and errors
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("User not found")]
    IdentityNotFound,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for IdentityStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IdentityNotFound, Self::IdentityNotFound) => true,
            (Self::StoreUnavailable(_), Self::StoreUnavailable(_)) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Key-addressable record store holding one row per pre-provisioned
/// identity. Updates are whole-record: no version stamp, last write
/// wins.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_unique_id(
        &self,
        unique_id: &UniqueId,
    ) -> Result<IdentityRecord, IdentityStoreError>;
    async fn update(&self, record: &IdentityRecord) -> Result<(), IdentityStoreError>;
    /// Operator-facing health report backing the db-status endpoint.
    async fn diagnostics(&self) -> Result<StoreDiagnostics, IdentityStoreError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreDiagnostics {
    pub connected: bool,
    pub table_exists: bool,
    pub identity_count: i64,
    pub sample: Vec<IdentitySummary>,
    pub columns: Vec<ColumnInfo>,
}

/// Redacted row view for diagnostics: no digest, no OTP material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    pub unique_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_registered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}
