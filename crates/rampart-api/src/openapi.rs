//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rampart API",
        version = "0.3.2",
        description = "Compliance assessment tracking: client directory, per-client assessment documents, whole-policy updates, statistics, and CSV/Markdown exports.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Clients
        crate::routes::clients::list_clients,
        crate::routes::clients::list_client_summaries,
        // Assessments
        crate::routes::assessments::get_assessment,
        crate::routes::assessments::save_assessment,
        // Policies
        crate::routes::policies::update_policy,
        // Stats
        crate::routes::stats::get_stats,
        // Exports
        crate::routes::exports::export_csv,
        crate::routes::exports::export_report,
    ),
    components(schemas(
        // Domain types
        rampart_core::AssessmentDocument,
        rampart_core::AssessmentData,
        rampart_core::Policy,
        rampart_core::PolicyStatus,
        rampart_core::ClientApproval,
        rampart_core::ComplianceStats,
        rampart_core::Percentages,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // DTOs
        crate::routes::assessments::SaveAssessmentRequest,
        crate::routes::clients::ClientEntry,
        crate::routes::clients::ClientSummary,
    )),
    tags(
        (name = "clients", description = "Client directory and admin summaries"),
        (name = "assessments", description = "Per-client assessment documents"),
        (name = "policies", description = "Whole-policy replacement"),
        (name = "stats", description = "Compliance statistics"),
        (name = "exports", description = "CSV and Markdown exports"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
