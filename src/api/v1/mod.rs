//! Versioned API endpoints

pub mod process;

use axum::{routing::post, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/process", post(process::process_document))
}
