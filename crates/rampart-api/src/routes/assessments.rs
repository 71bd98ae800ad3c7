//! # Assessment Document API
//!
//! Fetches and saves whole assessment documents per client. Reads are served
//! from the in-memory repository; saves land in the repository and, when a
//! database pool is configured, are written through to Postgres.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use rampart_core::{AssessmentData, AssessmentDocument, ClientId};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to save a client's full assessment tree.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentRequest {
    /// The category-keyed policy tree that replaces the stored one wholesale.
    #[schema(value_type = Object)]
    pub assessment_data: AssessmentData,
}

impl Validate for SaveAssessmentRequest {
    fn validate(&self) -> Result<(), String> {
        for (category, policy) in self.assessment_data.policies() {
            policy
                .validate()
                .map_err(|err| format!("category {category:?}: {err}"))?;
        }
        Ok(())
    }
}

/// Build the assessments router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/clients/:client_id/assessment",
        get(get_assessment).post(save_assessment),
    )
}

/// GET /v1/clients/:client_id/assessment — Fetch a client's assessment.
///
/// Clients without a stored document receive a fresh baseline-template
/// document with a 200; nothing is persisted until they save.
#[utoipa::path(
    get,
    path = "/v1/clients/{client_id}/assessment",
    params(("client_id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Stored document, or an unsaved baseline-template document", body = AssessmentDocument),
        (status = 422, description = "Invalid client id", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
async fn get_assessment(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<AssessmentDocument>, AppError> {
    let client_id = ClientId::new(client_id)?;
    Ok(Json(state.assessments.get_or_create(&client_id)))
}

/// POST /v1/clients/:client_id/assessment — Save a client's assessment.
#[utoipa::path(
    post,
    path = "/v1/clients/{client_id}/assessment",
    params(("client_id" = String, Path, description = "Client id")),
    request_body = SaveAssessmentRequest,
    responses(
        (status = 200, description = "Saved document", body = AssessmentDocument),
        (status = 422, description = "Invalid client id or policy tree", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
async fn save_assessment(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    body: Result<Json<SaveAssessmentRequest>, JsonRejection>,
) -> Result<Json<AssessmentDocument>, AppError> {
    let client_id = ClientId::new(client_id)?;
    let req = extract_validated_json(body)?;

    let document = state.assessments.save(&client_id, req.assessment_data);

    // Persist to database (write-through). Failure is surfaced to the client
    // because the in-memory document would be lost on restart, causing silent
    // data loss.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::assessments::upsert(pool, &document).await {
            tracing::error!(
                client_id = %document.client_id,
                error = %e,
                "failed to persist assessment to database"
            );
            return Err(AppError::Internal(
                "assessment recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(document))
}
