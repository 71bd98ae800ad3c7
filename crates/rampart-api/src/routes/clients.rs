//! # Client Directory API
//!
//! Two views of "which clients exist": the engagement roster compiled into
//! the binary (every client the practice tracks, saved assessment or not),
//! and the admin summary of clients that actually have a stored document.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rampart_core::ClientId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// One entry in the engagement roster.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientEntry {
    /// Client id used in assessment URLs.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Admin summary of one client with a stored assessment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    /// Client id.
    #[schema(value_type = String)]
    pub client_id: ClientId,
    /// When the client's assessment was last written.
    pub last_modified: DateTime<Utc>,
}

/// The engagement roster. Assessments can exist for ids outside this list
/// (the API accepts any well-formed client id); the roster only drives the
/// client picker in the frontend.
const CLIENT_DIRECTORY: &[(&str, &str)] = &[
    ("aan-services", "AAN Services"),
    ("alpine-investments", "Alpine Investments"),
    ("apple-tree-partners", "Apple Tree Partners"),
    ("arch-street-capital", "Arch Street Capital"),
    ("bedeschi-america", "Bedeschi America"),
    ("blue-aerospace", "Blue Aerospace"),
    ("botanical-designs", "Botanical Designs"),
    ("brighton-group-lieberman", "Brighton Group / Lieberman"),
    ("calixto-global-investors", "Calixto Global Investors"),
    ("coco-bahamas-tropic", "Coco Bahamas (Tropic)"),
    ("china-overseas-america", "China Overseas America"),
    ("cosmetic-solutions", "Cosmetic Solutions"),
    ("d-d-aviation", "D & D Aviation"),
    ("feam", "FEAM"),
    ("fir-tree", "Fir Tree"),
    ("first-liberties-financial", "First Liberties Financial"),
    ("framework-ventures", "Framework Ventures"),
    ("further-films", "Further Films"),
    ("holistix-welevelup", "Holistix (WeLevelUp)"),
    ("hudson-executive-capital", "Hudson Executive Capital LP"),
    ("hudson-sustainable-group", "Hudson Sustainable Group"),
    ("hurricane-aerospace-solutions", "Hurricane Aerospace Solutions"),
    ("inspyr-solutions", "INSPYR Solutions"),
    ("integrated-media", "Integrated Media"),
    ("intelligent-portfolio", "Intelligent Portfolio"),
    ("kcd-inc", "KCD, Inc"),
    ("lavior", "Lavior"),
    ("linden-shore", "Linden Shore"),
    ("loesche-america", "Loesche America"),
    ("long-ridge-equity-partners", "Long Ridge Equity Partners"),
    ("mplt-healthcare", "MPLT Healthcare"),
    ("mgx", "MGX"),
    ("mubadala-capital", "Mubadala Capital"),
    ("mubadala-investment", "Mubadala Investment"),
    ("nanotronics", "Nanotronics"),
    ("ocean-air-arc145", "Ocean Air / ARC145"),
    ("opera-america", "OPERA America LLC"),
    ("oxxo", "OXXO"),
    ("paragon-outcomes", "Paragon Outcomes"),
    ("pem-air-turbine-pates", "PEM Air Turbine (PATES)"),
    ("prose-hair", "Prose Hair"),
    ("remedy-drinks", "Remedy Drinks"),
    ("riverie-farm", "Riverie Farm"),
    ("samson-capital-group", "Samson Capital Group"),
    ("samson-investment-partners", "Samson Investment Partners"),
    ("seligson-rothman-rothman", "Seligson, Rothman & Rothman"),
    ("sentry-aerospares", "Sentry Aerospares"),
    ("somos-foods", "Somos Foods"),
    ("steiner-leisure", "Steiner Leisure"),
    ("steven-douglas", "Steven Douglas"),
    ("systematic-financial", "Systematic Financial"),
    ("tally-health", "Tally Health"),
    ("the-vertical-group", "The Vertical Group"),
    ("time-equities", "Time Equities, Inc."),
    ("tkg-business-management", "TKG Business Management"),
    ("touch-point-aviation", "Touch Point Aviation"),
    ("tropic-ocean-airways", "Tropic Ocean Airways"),
    ("valley-forge-capital", "Valley Forge Capital"),
    ("velocity-capital-management", "Velocity Capital Management"),
    ("water-asset-management", "Water Asset Management, LLC."),
    ("wencor-group", "Wencor Group"),
    ("test-client", "Test Client"),
];

/// Build the clients router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/clients", get(list_clients))
        .route("/v1/admin/clients", get(list_client_summaries))
}

/// GET /v1/clients — The engagement roster.
#[utoipa::path(
    get,
    path = "/v1/clients",
    responses(
        (status = 200, description = "All known clients", body = [ClientEntry]),
    ),
    tag = "clients"
)]
async fn list_clients() -> Json<Vec<ClientEntry>> {
    Json(
        CLIENT_DIRECTORY
            .iter()
            .map(|(id, name)| ClientEntry {
                id: (*id).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
    )
}

/// GET /v1/admin/clients — Clients with a stored assessment.
#[utoipa::path(
    get,
    path = "/v1/admin/clients",
    responses(
        (status = 200, description = "Summaries ordered by client id", body = [ClientSummary]),
    ),
    tag = "clients"
)]
async fn list_client_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientSummary>>, AppError> {
    let summaries = state
        .assessments
        .summaries()
        .into_iter()
        .map(|(client_id, last_modified)| ClientSummary {
            client_id,
            last_modified,
        })
        .collect();
    Ok(Json(summaries))
}
