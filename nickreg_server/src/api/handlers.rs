// API handlers for the nickname server
//
// Registry calls block on SQLite, so each one runs on the blocking pool.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, Path, State},
};
use nickreg::{Claim, RegistryError};
use tracing::{debug, error};

use crate::api::AppState;
use crate::error::{ApiError, Result};

/// List every stored claim
#[axum::debug_handler]
pub async fn list_nicks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Claim>>> {
    let registry = state.registry.clone();
    let claims = run_blocking(move || registry.list()).await?;

    debug!("Listing {} claims", claims.len());
    Ok(Json(claims))
}

/// Return the claim of one identity
///
/// The identity is hex encoded; a trailing ".json" is ignored.
#[axum::debug_handler]
pub async fn get_nick(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Claim>> {
    let id = id.strip_suffix(".json").unwrap_or(&id);
    let identity =
        hex::decode(id).map_err(|_| ApiError::bad_request().with_message("Invalid node ID."))?;

    let registry = state.registry.clone();
    match run_blocking(move || registry.get(&identity)).await? {
        Some(claim) => Ok(Json(claim)),
        None => Err(ApiError::not_found()),
    }
}

/// Submit a claim
///
/// Answers `null` once the claim is stored.
#[axum::debug_handler]
pub async fn put_nick(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<()>> {
    let claim: Claim = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected undecodable claim: {}", e);
        ApiError::bad_request()
    })?;

    let registry = state.registry.clone();
    run_blocking(move || registry.put(&claim)).await?;

    Ok(Json(()))
}

async fn run_blocking<T, F>(operation: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, RegistryError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(operation).await.map_err(|e| {
        error!("Registry task failed: {}", e);
        ApiError::internal()
    })?;

    Ok(result?)
}
