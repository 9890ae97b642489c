//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use slcat_rs_client::{QueryRunner, Target};
use tokio::sync::Mutex;

use crate::dto::{CatalogResponse, ErrorResponse};

/// Shared application state.
///
/// The runner (and the cache it owns) sits behind one mutex: requests are
/// served one at a time, which keeps the cache single-writer.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<Mutex<QueryRunner>>,
}

#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Comma-separated `host[:port]` list.
    hosts: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(get_stations))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Resolve the station catalogs of every requested target.
///
/// Malformed input is the only non-200 outcome; per-target failures come
/// back as data inside the 200 response.
async fn get_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<CatalogResponse>, (StatusCode, Json<ErrorResponse>)> {
    let targets = parse_targets(&query.hosts).map_err(|error| {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
    })?;

    tracing::debug!(targets = targets.len(), "resolving catalogs");
    let results = state.runner.lock().await.run(&targets).await;

    Ok(Json(CatalogResponse {
        servers: results.into_iter().map(Into::into).collect(),
    }))
}

/// Split a comma-separated `host[:port]` list into targets.
///
/// Blank items are dropped; an empty list or an unparsable spec is an error.
fn parse_targets(hosts: &str) -> Result<Vec<Target>, String> {
    let mut targets = Vec::new();
    for spec in hosts.split(',') {
        let spec = spec.trim();
        if spec.is_empty() {
            continue;
        }
        targets.push(Target::parse(spec).map_err(|e| e.to_string())?);
    }
    if targets.is_empty() {
        return Err("no targets given".to_owned());
    }
    Ok(targets)
}
