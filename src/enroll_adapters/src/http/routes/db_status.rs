use axum::{Json, extract::State, response::IntoResponse};
use enroll_core::{IdentityStore, StoreDiagnostics};
use serde::Serialize;

use super::error::EnrollApiError;

#[derive(Serialize)]
pub struct DbStatusResponse {
    pub status: String,
    pub database: DatabaseReport,
    pub recommendations: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseReport {
    pub connected: bool,
    pub table_exists: bool,
    pub user_count: i64,
    pub sample_users: Vec<SampleUser>,
    pub table_structure: Vec<TableColumn>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleUser {
    pub unique_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_registered: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// Operator diagnostic endpoint: connection, schema, row sample, and
/// what to do next.
#[tracing::instrument(name = "Database status", skip_all)]
pub async fn db_status<S>(
    State(identity_store): State<S>,
) -> Result<impl IntoResponse, EnrollApiError>
where
    S: IdentityStore + Clone + 'static,
{
    let diagnostics = identity_store.diagnostics().await?;
    let recommendations = recommendations(&diagnostics);

    Ok(Json(DbStatusResponse {
        status: "connected".to_string(),
        database: DatabaseReport {
            connected: diagnostics.connected,
            table_exists: diagnostics.table_exists,
            user_count: diagnostics.identity_count,
            sample_users: diagnostics
                .sample
                .into_iter()
                .map(|summary| SampleUser {
                    unique_id: summary.unique_id,
                    full_name: summary.full_name,
                    email: summary.email,
                    is_registered: summary.is_registered,
                })
                .collect(),
            table_structure: diagnostics
                .columns
                .into_iter()
                .map(|column| TableColumn {
                    column_name: column.name,
                    data_type: column.data_type,
                    is_nullable: column.is_nullable,
                })
                .collect(),
        },
        recommendations,
    }))
}

fn recommendations(diagnostics: &StoreDiagnostics) -> Vec<String> {
    if !diagnostics.table_exists {
        vec![
            "Users table does not exist".to_string(),
            "Run the bundled SQL migrations to create it".to_string(),
        ]
    } else if diagnostics.identity_count == 0 {
        vec![
            "Table exists but no users found".to_string(),
            "Provision an identity: INSERT INTO users (unique_id, full_name, email) VALUES (...)"
                .to_string(),
        ]
    } else {
        vec!["Database is ready".to_string()]
    }
}
