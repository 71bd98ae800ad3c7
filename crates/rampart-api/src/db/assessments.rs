//! Assessment document persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `assessments` table.
//! The policy tree is stored as one JSONB column rather than normalised
//! rows; documents are small and are always read and written whole.

use chrono::{DateTime, Utc};
use rampart_core::{AssessmentDocument, ClientId};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert or update an assessment document, keyed by document id.
///
/// Both the full-tree save and the single-policy update funnel through this
/// upsert: the document id never changes after creation, so a conflict on
/// the primary key is simply the update case.
pub async fn upsert(pool: &PgPool, document: &AssessmentDocument) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO assessments (id, client_id, assessment_data, created_at, last_modified, version)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (id) DO UPDATE SET
             client_id = EXCLUDED.client_id,
             assessment_data = EXCLUDED.assessment_data,
             last_modified = EXCLUDED.last_modified,
             version = EXCLUDED.version",
    )
    .bind(document.id)
    .bind(document.client_id.as_str())
    .bind(sqlx::types::Json(&document.assessment_data))
    .bind(document.created_at)
    .bind(document.last_modified)
    .bind(&document.version)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all assessment documents from the database into the in-memory
/// repository on startup. Rows that no longer decode are skipped with a
/// warning rather than failing the whole startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<AssessmentDocument>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AssessmentRow>(
        "SELECT id, client_id, assessment_data, created_at, last_modified, version
         FROM assessments ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    let mut documents = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_document() {
            Some(document) => documents.push(document),
            None => {
                tracing::error!("skipping undecodable assessment row during load_all");
            }
        }
    }
    Ok(documents)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct AssessmentRow {
    id: Uuid,
    client_id: String,
    assessment_data: serde_json::Value,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    version: String,
}

impl AssessmentRow {
    fn into_document(self) -> Option<AssessmentDocument> {
        let client_id = match ClientId::new(self.client_id.clone()) {
            Ok(client_id) => client_id,
            Err(_) => {
                tracing::warn!(
                    id = %self.id,
                    client_id = %self.client_id,
                    "skipping assessment row with invalid client_id"
                );
                return None;
            }
        };
        let assessment_data = match serde_json::from_value(self.assessment_data) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(
                    id = %self.id,
                    error = %e,
                    "skipping assessment row with undecodable assessment_data"
                );
                return None;
            }
        };
        Some(AssessmentDocument {
            id: self.id,
            client_id,
            assessment_data,
            created_at: self.created_at,
            last_modified: self.last_modified,
            version: self.version,
        })
    }
}
