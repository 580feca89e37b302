// API module for the nickname server
//
// Routes:
//
//   GET /nicks          every stored claim
//   GET /nicks/:id      claim of one identity, id in hex with optional ".json"
//   PUT /nicks          submit a claim

use std::sync::Arc;

use axum::{routing::get, Router};
use nickreg::Registry;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

mod handlers;

pub use handlers::*;

/// Application state shared across API handlers
pub struct AppState {
    /// Registry answering all requests
    pub registry: Arc<dyn Registry>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }
}

/// Create the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state to be shared with all handlers
///
/// # Returns
///
/// An Axum Router with CORS open to every origin and gzip compression
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/nicks", get(list_nicks).put(put_nick))
        .route("/nicks/:id", get(get_nick))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
