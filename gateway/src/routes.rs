//! RF link budget routes
//!
//! - `GET  /health`
//! - `POST /api/rf/cni`
//! - `POST /api/rf/cni/breakdown`
//! - `GET  /api/rf/modcods`

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use link_budget::{CniRequest, CniResponse, LinkBudgetBreakdown, LinkBudgetError, ModcodEntry};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub uptime_seconds: i64,
}

pub fn router(state: AppState) -> Router {
    let rf_routes = Router::new()
        .route("/cni", post(post_cni))
        .route("/cni/breakdown", post(post_cni_breakdown))
        .route("/modcods", get(list_modcods));

    Router::new()
        .route("/health", get(health))
        .nest("/api/rf", rf_routes)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "ok",
        service: "cni-gateway",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now.to_rfc3339(),
        uptime_seconds: (now - state.started_at).num_seconds(),
    })
}

/// Map a core error to a client-facing status
fn reject(request_id: Uuid, err: LinkBudgetError) -> (StatusCode, String) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    warn!(%request_id, error = %err, "link budget rejected");
    (status, err.to_string())
}

/// Uplink, downlink and end-to-end C/(N+I) with the suggested MODCOD
pub async fn post_cni(
    Json(request): Json<CniRequest>,
) -> Result<Json<CniResponse>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();

    let response = link_budget::compute_cni(&request).map_err(|e| reject(request_id, e))?;

    info!(
        %request_id,
        total_cni_db = response.total_cni_db.value(),
        modcod = response.suggested_modcod.as_ref().map(|m| m.name.as_str()).unwrap_or("none"),
        "link budget computed"
    );

    Ok(Json(response))
}

/// Same computation with per-hop slant range, FSPL, C/N0, C/N and C/I
pub async fn post_cni_breakdown(
    Json(request): Json<CniRequest>,
) -> Result<Json<LinkBudgetBreakdown>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();

    let breakdown = link_budget::compute_breakdown(&request).map_err(|e| reject(request_id, e))?;

    info!(
        %request_id,
        total_cni_db = breakdown.total_cni_db.value(),
        available_esn0_db = breakdown.available_esn0_db.value(),
        "link budget breakdown computed"
    );

    Ok(Json(breakdown))
}

/// DVB-S2 threshold table, ascending by required Es/N0
pub async fn list_modcods() -> Json<&'static [ModcodEntry]> {
    Json(link_budget::modcod_table())
}
