//! # rampart-api — Axum HTTP API for the Rampart Assessment Tracker
//!
//! Serves per-client compliance assessments: a client directory, whole
//! assessment documents, single-policy updates, aggregated statistics, and
//! CSV/Markdown exports. Every request is served from an in-memory
//! repository; Postgres, when configured, is a write-through copy that the
//! repository is rehydrated from on startup.
//!
//! ## API Surface
//!
//! | Route                                        | Module                   |
//! |----------------------------------------------|--------------------------|
//! | `GET  /v1/clients`                           | [`routes::clients`]      |
//! | `GET  /v1/admin/clients`                     | [`routes::clients`]      |
//! | `GET  /v1/clients/:id/assessment`            | [`routes::assessments`]  |
//! | `POST /v1/clients/:id/assessment`            | [`routes::assessments`]  |
//! | `PUT  /v1/clients/:id/policies/:policy_id`   | [`routes::policies`]     |
//! | `GET  /v1/clients/:id/stats`                 | [`routes::stats`]        |
//! | `GET  /v1/clients/:id/export/csv`            | [`routes::exports`]      |
//! | `GET  /v1/clients/:id/report`                | [`routes::exports`]      |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the middleware stack so
/// orchestrators can hit them without CORS or tracing in the way. CORS is
/// permissive: the frontend is served from a different origin and the API
/// carries no credentials.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::clients::router())
        .merge(routes::assessments::router())
        .merge(routes::policies::router())
        .merge(routes::stats::router())
        .merge(routes::exports::router())
        .merge(openapi::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
/// Pings the database when one is configured.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            return Err(AppError::ServiceUnavailable(format!(
                "database ping failed: {e}"
            )));
        }
    }
    Ok("ready")
}
