//! # Policy Update API
//!
//! Whole-policy replacement inside a stored assessment. The request body is
//! the replacement [`Policy`] itself; the policy addressed by the path is
//! overwritten with it field-for-field, so omitted optional fields reset to
//! their defaults rather than surviving from the old value.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Json, Router};
use rampart_core::{AssessmentDocument, ClientId, Policy};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

impl Validate for Policy {
    fn validate(&self) -> Result<(), String> {
        Policy::validate(self).map_err(|err| err.to_string())
    }
}

/// Build the policies router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/clients/:client_id/policies/:policy_id",
        put(update_policy),
    )
}

/// PUT /v1/clients/:client_id/policies/:policy_id — Replace one policy.
///
/// Requires a stored assessment; clients still on the unsaved template get a
/// 404 and must save the full document first.
#[utoipa::path(
    put,
    path = "/v1/clients/{client_id}/policies/{policy_id}",
    params(
        ("client_id" = String, Path, description = "Client id"),
        ("policy_id" = String, Path, description = "Id of the policy to replace"),
    ),
    request_body = Policy,
    responses(
        (status = 200, description = "Updated document", body = AssessmentDocument),
        (status = 404, description = "No stored assessment, or no such policy", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid client id or policy body", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
async fn update_policy(
    State(state): State<AppState>,
    Path((client_id, policy_id)): Path<(String, String)>,
    body: Result<Json<Policy>, JsonRejection>,
) -> Result<Json<AssessmentDocument>, AppError> {
    let client_id = ClientId::new(client_id)?;
    let replacement = extract_validated_json(body)?;

    let document = state
        .assessments
        .update_policy(&client_id, &policy_id, replacement)?;

    // Persist to database (write-through). Same contract as saving the full
    // document: a failed persist is surfaced rather than silently dropped.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::assessments::upsert(pool, &document).await {
            tracing::error!(
                client_id = %document.client_id,
                policy_id = %policy_id,
                error = %e,
                "failed to persist policy update to database"
            );
            return Err(AppError::Internal(
                "policy updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(document))
}
