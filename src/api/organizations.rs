//! Organization API endpoints (read-only directory)

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::{db::EntityStore, models::Organization, utils::AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_organizations))
        .route("/{id}", get(get_organization))
}

async fn list_organizations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Organization>>, AppError> {
    let orgs = state.store.list_organizations().await.map_err(|e| {
        tracing::error!("Failed to list organizations: {}", e);
        AppError::internal("Failed to list organizations")
    })?;

    Ok(Json(orgs))
}

async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Organization>, AppError> {
    let uuid =
        Uuid::parse_str(&id).map_err(|_| AppError::bad_request("Invalid organization ID"))?;

    let org = state.store.organization_by_id(uuid).await.map_err(|e| {
        tracing::error!("Failed to get organization: {}", e);
        AppError::internal("Failed to get organization")
    })?;

    match org {
        Some(o) => Ok(Json(o)),
        None => Err(AppError::not_found("Organization not found")),
    }
}
