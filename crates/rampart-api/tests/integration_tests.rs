//! # Integration Tests for rampart-api
//!
//! Exercises the full router end to end: client directory, assessment
//! fetch/save, whole-policy updates, statistics, exports, error mapping,
//! and OpenAPI spec generation. All tests run in-memory (no database).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rampart_api::state::AppState;
use rampart_core::ClientId;

/// Helper: build the test app with no database.
fn test_app() -> axum::Router {
    rampart_api::app(AppState::new())
}

/// Helper: build the test app plus a handle on its state for seeding.
fn test_app_with_state() -> (axum::Router, AppState) {
    let state = AppState::new();
    (rampart_api::app(state.clone()), state)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// A three-policy tree matching the worked statistics example:
/// one compliant+approved, one partially compliant, one untouched.
fn sample_tree() -> Value {
    json!({
        "Identity": [
            {
                "id": "p1",
                "name": "Require MFA",
                "description": "Stops credential stuffing.",
                "userImpact": "Some extra steps during login.",
                "tech": "Identity team",
                "status": "Compliant",
                "clientApproval": "approved",
                "notes": "",
                "rolloutDate": "2026-04-01"
            },
            {
                "id": "p2",
                "name": "Block legacy auth",
                "status": "Partially Compliant",
                "clientApproval": null
            },
            { "id": "p3", "name": "Disk encryption" }
        ]
    })
}

/// Helper: seed a saved assessment directly through the repository.
fn seed_assessment(state: &AppState, client: &str) {
    let data = serde_json::from_value(sample_tree()).unwrap();
    state
        .assessments
        .save(&ClientId::new(client).unwrap(), data);
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Client Directory ---------------------------------------------------------

#[tokio::test]
async fn test_client_directory_lists_the_roster() {
    let response = test_app().oneshot(get("/v1/clients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 62);
    assert!(entries
        .iter()
        .any(|e| e["id"] == "blue-aerospace" && e["name"] == "Blue Aerospace"));
}

#[tokio::test]
async fn test_admin_summaries_empty_without_saves() {
    let response = test_app().oneshot(get("/v1/admin/clients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_admin_summaries_list_saved_clients_in_order() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "zeta-corp");
    seed_assessment(&state, "acme");

    let response = app.oneshot(get("/v1/admin/clients")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let summaries = body.as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["clientId"], "acme");
    assert_eq!(summaries[1]["clientId"], "zeta-corp");
    assert!(summaries[0]["lastModified"].is_string());
}

// -- Assessment Fetch ---------------------------------------------------------

#[tokio::test]
async fn test_get_assessment_serves_template_for_unknown_client() {
    let (app, state) = test_app_with_state();
    let response = app
        .oneshot(get("/v1/clients/fresh-client/assessment"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["clientId"], "fresh-client");
    assert_eq!(body["version"], "1.0");
    let policies = body["assessmentData"]["Conditional Access for Evaluated Accounts"]
        .as_array()
        .unwrap();
    assert_eq!(policies[0]["id"], "policy_3");
    assert_eq!(policies[0]["status"], Value::Null);

    // The template document is never persisted by a read.
    assert!(state.assessments.is_empty());
}

#[tokio::test]
async fn test_get_assessment_returns_the_stored_document() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");
    let saved_id = state
        .assessments
        .find(&ClientId::new("acme").unwrap())
        .unwrap()
        .id;

    let response = app
        .oneshot(get("/v1/clients/acme/assessment"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], saved_id.to_string());
    assert_eq!(body["assessmentData"]["Identity"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_assessment_rejects_invalid_client_id() {
    let response = test_app()
        .oneshot(get("/v1/clients/not%20a%20slug/assessment"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// -- Assessment Save ----------------------------------------------------------

#[tokio::test]
async fn test_save_assessment_persists_the_document() {
    let (app, state) = test_app_with_state();
    let response = app
        .oneshot(json_request(
            "POST",
            "/v1/clients/acme/assessment",
            json!({ "assessmentData": sample_tree() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["clientId"], "acme");
    assert_eq!(body["version"], "1.0");

    let stored = state.assessments.find(&ClientId::new("acme").unwrap()).unwrap();
    assert_eq!(stored.id.to_string(), body["id"].as_str().unwrap());
    assert_eq!(stored.assessment_data.policy_count(), 3);
}

#[tokio::test]
async fn test_resave_keeps_identity_and_replaces_the_tree() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v1/clients/acme/assessment",
            json!({ "assessmentData": sample_tree() }),
        ))
        .await
        .unwrap();
    let first = body_json(first).await;

    let second = app
        .oneshot(json_request(
            "POST",
            "/v1/clients/acme/assessment",
            json!({ "assessmentData": { "Devices": [ { "id": "p9", "name": "Screen lock" } ] } }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["createdAt"], first["createdAt"]);
    // Whole-tree replacement: the old category is gone.
    assert!(second["assessmentData"]["Identity"].is_null());
    assert_eq!(second["assessmentData"]["Devices"][0]["id"], "p9");
}

#[tokio::test]
async fn test_save_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/clients/acme/assessment")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_save_rejects_unknown_status_strings() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/v1/clients/acme/assessment",
            json!({ "assessmentData": {
                "Identity": [ { "id": "p1", "name": "MFA", "status": "Mostly Compliant" } ]
            }}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_save_rejects_blank_policy_name() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/v1/clients/acme/assessment",
            json!({ "assessmentData": {
                "Identity": [ { "id": "p1", "name": "   " } ]
            }}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Identity"));
}

// -- Policy Update ------------------------------------------------------------

#[tokio::test]
async fn test_update_policy_replaces_wholesale() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/clients/acme/policies/p2",
            json!({
                "id": "p2",
                "name": "Block legacy auth",
                "status": "Compliant",
                "clientApproval": "approved"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let policies = body["assessmentData"]["Identity"].as_array().unwrap();
    let p2 = policies.iter().find(|p| p["id"] == "p2").unwrap();
    assert_eq!(p2["status"], "Compliant");
    assert_eq!(p2["clientApproval"], "approved");
    // Replacement is wholesale: fields omitted from the body reset.
    assert_eq!(p2["notes"], "");
    // Neighbouring policies are untouched.
    let p1 = policies.iter().find(|p| p["id"] == "p1").unwrap();
    assert_eq!(p1["status"], "Compliant");
}

#[tokio::test]
async fn test_update_policy_bumps_last_modified() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");
    let before = state
        .assessments
        .find(&ClientId::new("acme").unwrap())
        .unwrap()
        .last_modified;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/clients/acme/policies/p3",
            json!({ "id": "p3", "name": "Disk encryption", "status": "Compliant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after = state
        .assessments
        .find(&ClientId::new("acme").unwrap())
        .unwrap()
        .last_modified;
    assert!(after >= before);
}

#[tokio::test]
async fn test_update_policy_404_without_stored_document() {
    let response = test_app()
        .oneshot(json_request(
            "PUT",
            "/v1/clients/ghost/policies/p1",
            json!({ "id": "p1", "name": "MFA" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_policy_404_for_unknown_policy_id() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/clients/acme/policies/p404",
            json!({ "id": "p404", "name": "Ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_policy_rejects_blank_id() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/v1/clients/acme/policies/p2",
            json!({ "id": "", "name": "Block legacy auth" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// -- Statistics ---------------------------------------------------------------

#[tokio::test]
async fn test_stats_404_without_stored_document() {
    let response = test_app()
        .oneshot(get("/v1/clients/ghost/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_match_the_worked_example() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");

    let response = app.oneshot(get("/v1/clients/acme/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "total": 3,
            "compliant": 1,
            "partial": 1,
            "nonCompliant": 0,
            "pending": 1,
            "approved": 1,
            "percentages": {
                "compliant": 33,
                "partial": 33,
                "nonCompliant": 0,
                "pending": 33,
                "approved": 33
            }
        })
    );
}

// -- Exports ------------------------------------------------------------------

#[tokio::test]
async fn test_csv_export_404_without_stored_document() {
    let response = test_app()
        .oneshot(get("/v1/clients/ghost/export/csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_csv_export_serves_a_download() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "acme");

    let response = app
        .oneshot(get("/v1/clients/acme/export/csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = headers.get("content-disposition").unwrap().to_str().unwrap();
    assert!(disposition.contains("Microsoft_Assessment_acme_"));
    assert!(disposition.ends_with(".csv\""));

    let body = body_string(response).await;
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("Category,Policy Name,Status"));
    assert_eq!(lines.count(), 3);
}

#[tokio::test]
async fn test_report_renders_markdown() {
    let (app, state) = test_app_with_state();
    seed_assessment(&state, "blue-aerospace");

    let response = app
        .oneshot(get("/v1/clients/blue-aerospace/report"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/markdown"));

    let body = body_string(response).await;
    assert!(body.starts_with("# Microsoft Best Practices Assessment Report"));
    assert!(body.contains("## Client: Blue Aerospace"));
    assert!(body.contains("- **Total Policies Assessed:** 3"));
    assert!(body.contains("#### Identity"));
}

#[tokio::test]
async fn test_report_404_without_stored_document() {
    let response = test_app()
        .oneshot(get("/v1/clients/ghost/report"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["openapi"].is_string());
    assert_eq!(body["info"]["title"], "Rampart API");
    assert!(body["paths"]["/v1/clients/{client_id}/assessment"].is_object());
}
