//! # Export API
//!
//! CSV and Markdown renderings of a stored assessment. Both endpoints
//! require a persisted document; the unsaved baseline template is not
//! exportable.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use rampart_core::{render_csv, render_report, AssessmentDocument, ClientId};

use crate::error::AppError;
use crate::state::AppState;

/// Build the exports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/clients/:client_id/export/csv", get(export_csv))
        .route("/v1/clients/:client_id/report", get(export_report))
}

fn stored_document(state: &AppState, client_id: &ClientId) -> Result<AssessmentDocument, AppError> {
    state
        .assessments
        .find(client_id)
        .ok_or_else(|| AppError::NotFound(format!("no assessment stored for client {client_id}")))
}

/// GET /v1/clients/:client_id/export/csv — CSV export of the assessment.
#[utoipa::path(
    get,
    path = "/v1/clients/{client_id}/export/csv",
    params(("client_id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "CSV download, one row per policy", content_type = "text/csv"),
        (status = 404, description = "No stored assessment", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid client id", body = crate::error::ErrorBody),
    ),
    tag = "exports"
)]
async fn export_csv(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Response, AppError> {
    let client_id = ClientId::new(client_id)?;
    let document = stored_document(&state, &client_id)?;

    let today = Utc::now().date_naive();
    let csv = render_csv(&document.assessment_data, today);
    let filename = format!("Microsoft_Assessment_{client_id}_{today}.csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /v1/clients/:client_id/report — Markdown assessment report.
#[utoipa::path(
    get,
    path = "/v1/clients/{client_id}/report",
    params(("client_id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Markdown report", content_type = "text/markdown"),
        (status = 404, description = "No stored assessment", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid client id", body = crate::error::ErrorBody),
    ),
    tag = "exports"
)]
async fn export_report(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Response, AppError> {
    let client_id = ClientId::new(client_id)?;
    let document = stored_document(&state, &client_id)?;

    let today = Utc::now().date_naive();
    let report = render_report(&client_id, &document.assessment_data, today);

    Ok((
        [(
            header::CONTENT_TYPE,
            "text/markdown; charset=utf-8".to_string(),
        )],
        report,
    )
        .into_response())
}
