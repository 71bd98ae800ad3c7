//! # Compliance Statistics API
//!
//! Read-only aggregation over a client's stored assessment.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use rampart_core::{ClientId, ComplianceStats};

use crate::error::AppError;
use crate::state::AppState;

/// Build the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/clients/:client_id/stats", get(get_stats))
}

/// GET /v1/clients/:client_id/stats — Compliance statistics.
///
/// Unlike the assessment fetch, this endpoint does not fall back to the
/// baseline template; a client with no stored document is a 404.
#[utoipa::path(
    get,
    path = "/v1/clients/{client_id}/stats",
    params(("client_id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Aggregated statistics", body = ComplianceStats),
        (status = 404, description = "No stored assessment", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid client id", body = crate::error::ErrorBody),
    ),
    tag = "stats"
)]
async fn get_stats(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ComplianceStats>, AppError> {
    let client_id = ClientId::new(client_id)?;
    let document = state
        .assessments
        .find(&client_id)
        .ok_or_else(|| AppError::NotFound(format!("no assessment stored for client {client_id}")))?;

    Ok(Json(ComplianceStats::compute(&document.assessment_data)))
}
