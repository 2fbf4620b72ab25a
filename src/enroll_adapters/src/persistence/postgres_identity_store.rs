use chrono::{DateTime, Utc};
use enroll_core::{
    ColumnInfo, Email, IdentityRecord, IdentityStore, IdentityStoreError, IdentitySummary,
    OtpCode, PasswordDigest, StoreDiagnostics, UniqueId,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

const SAMPLE_LIMIT: i64 = 5;

// Postgres "undefined_table"
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Clone)]
pub struct PostgresIdentityStore {
    pool: sqlx::PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresIdentityStore { pool }
    }
}

#[async_trait::async_trait]
impl IdentityStore for PostgresIdentityStore {
    #[tracing::instrument(name = "Retrieving identity from PostgreSQL", skip_all)]
    async fn find_by_unique_id(
        &self,
        unique_id: &UniqueId,
    ) -> Result<IdentityRecord, IdentityStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, unique_id, full_name, email, password_hash,
                       is_registered, otp_code, otp_expires_at
                FROM users
                WHERE unique_id = $1
            "#,
        )
        .bind(unique_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Err(IdentityStoreError::IdentityNotFound);
        };

        row_to_record(&row)
    }

    #[tracing::instrument(name = "Updating identity in PostgreSQL", skip_all)]
    async fn update(&self, record: &IdentityRecord) -> Result<(), IdentityStoreError> {
        // Only the fields this flow owns; unique_id, full_name and email
        // belong to provisioning.
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2,
                    is_registered = $3,
                    otp_code = $4,
                    otp_expires_at = $5
                WHERE unique_id = $1
            "#,
        )
        .bind(record.unique_id().as_str())
        .bind(
            record
                .password_digest()
                .map(|digest| digest.as_ref().expose_secret().clone()),
        )
        .bind(record.is_registered())
        .bind(record.otp_code().map(|code| code.as_str().to_string()))
        .bind(record.otp_expires_at())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityStoreError::IdentityNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Collecting store diagnostics", skip_all)]
    async fn diagnostics(&self) -> Result<StoreDiagnostics, IdentityStoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| IdentityStoreError::StoreUnavailable(e.to_string()))?;

        let table_exists: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_name = 'users'
                )
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if !table_exists {
            return Ok(StoreDiagnostics {
                connected: true,
                table_exists: false,
                identity_count: 0,
                sample: Vec::new(),
                columns: Vec::new(),
            });
        }

        let identity_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let sample = sqlx::query(
            r#"
                SELECT unique_id, full_name, email, is_registered
                FROM users
                ORDER BY id
                LIMIT $1
            "#,
        )
        .bind(SAMPLE_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .iter()
        .map(row_to_summary)
        .collect::<Result<Vec<_>, _>>()?;

        let columns = sqlx::query(
            r#"
                SELECT column_name, data_type, is_nullable
                FROM information_schema.columns
                WHERE table_name = 'users'
                ORDER BY ordinal_position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .iter()
        .map(row_to_column)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(StoreDiagnostics {
            connected: true,
            table_exists: true,
            identity_count,
            sample,
            columns,
        })
    }
}

fn row_to_record(row: &PgRow) -> Result<IdentityRecord, IdentityStoreError> {
    let id: i64 = row.try_get("id").map_err(unexpected)?;
    let unique_id: String = row.try_get("unique_id").map_err(unexpected)?;
    let full_name: String = row.try_get("full_name").map_err(unexpected)?;
    let email: Option<String> = row.try_get("email").map_err(unexpected)?;
    let password_hash: Option<String> = row.try_get("password_hash").map_err(unexpected)?;
    let is_registered: bool = row.try_get("is_registered").map_err(unexpected)?;
    let otp_code: Option<String> = row.try_get("otp_code").map_err(unexpected)?;
    let otp_expires_at: Option<DateTime<Utc>> =
        row.try_get("otp_expires_at").map_err(unexpected)?;

    let unique_id = UniqueId::parse(unique_id).map_err(unexpected)?;

    // An empty or malformed address means the record has no usable
    // contact; send-otp reports MissingContact instead of 500ing.
    let email = email.and_then(|raw| Email::parse(Secret::from(raw)).ok());

    let password_digest = password_hash.map(|hash| PasswordDigest::new(Secret::from(hash)));

    let otp_code = otp_code
        .map(OtpCode::parse)
        .transpose()
        .map_err(unexpected)?;

    IdentityRecord::from_parts(
        id,
        unique_id,
        full_name,
        email,
        password_digest,
        is_registered,
        otp_code,
        otp_expires_at,
    )
    .map_err(unexpected)
}

fn row_to_summary(row: &PgRow) -> Result<IdentitySummary, IdentityStoreError> {
    Ok(IdentitySummary {
        unique_id: row.try_get("unique_id").map_err(unexpected)?,
        full_name: row.try_get("full_name").map_err(unexpected)?,
        email: row.try_get("email").map_err(unexpected)?,
        is_registered: row.try_get("is_registered").map_err(unexpected)?,
    })
}

fn row_to_column(row: &PgRow) -> Result<ColumnInfo, IdentityStoreError> {
    let is_nullable: String = row.try_get("is_nullable").map_err(unexpected)?;
    Ok(ColumnInfo {
        name: row.try_get("column_name").map_err(unexpected)?,
        data_type: row.try_get("data_type").map_err(unexpected)?,
        is_nullable: is_nullable.eq_ignore_ascii_case("yes"),
    })
}

fn unexpected<E: std::fmt::Display>(error: E) -> IdentityStoreError {
    IdentityStoreError::UnexpectedError(error.to_string())
}

fn map_sqlx_error(error: sqlx::Error) -> IdentityStoreError {
    match &error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            IdentityStoreError::StoreUnavailable(error.to_string())
        }
        sqlx::Error::Database(db_error) if db_error.code().as_deref() == Some(UNDEFINED_TABLE) => {
            IdentityStoreError::StoreUnavailable(format!(
                "users table does not exist, run the migrations: {error}"
            ))
        }
        _ => IdentityStoreError::UnexpectedError(error.to_string()),
    }
}
