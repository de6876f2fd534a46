//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::{routing::get, Router};

use crate::AppState;

mod employees;
mod health;
mod organizations;
mod tenders;

pub use health::*;

/// Create the full API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::health_check_detailed))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Resource endpoints
        .nest("/tenders", tenders::routes())
        .nest("/organizations", organizations::routes())
        .nest("/employees", employees::routes())
}
