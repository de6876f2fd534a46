//! Tender API endpoints
//!
//! Thin adapters over the tender service: extract and validate transport
//! input, delegate, map engine errors to HTTP statuses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{CreateTenderRequest, Tender, TenderStatus, UpdateTenderRequest},
    utils::{validate_service_type, validate_username, AppError},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenders))
        .route("/new", post(create_tender))
        .route("/my", get(my_tenders))
        .route("/{id}/edit", patch(edit_tender))
        .route("/{id}/rollback/{version}", put(rollback_tender))
        .route("/{id}/status", get(tender_status).put(set_tender_status))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default = "default_service_type")]
    service_type: String,
}

fn default_service_type() -> String {
    "all".to_string()
}

/// Acting identity; no session mechanism, the caller names the user
#[derive(Debug, Deserialize)]
struct UserQuery {
    username: String,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: String,
    username: String,
}

fn parse_tender_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("Invalid tender ID"))
}

fn require_username(username: &str) -> Result<(), AppError> {
    if validate_username(username) {
        Ok(())
    } else {
        Err(AppError::bad_request("Invalid username"))
    }
}

async fn list_tenders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Tender>>, AppError> {
    if !validate_service_type(&query.service_type) {
        return Err(AppError::bad_request("Invalid service type"));
    }

    let tenders = state.tenders.list(&query.service_type).await?;
    Ok(Json(tenders))
}

async fn create_tender(
    State(state): State<AppState>,
    Json(payload): Json<CreateTenderRequest>,
) -> Result<(StatusCode, Json<Tender>), AppError> {
    payload.validate()?;
    require_username(&payload.creator_username)?;

    let tender = state.tenders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(tender)))
}

async fn my_tenders(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<Tender>>, AppError> {
    require_username(&query.username)?;

    let tenders = state.tenders.list_for_employee(&query.username).await?;
    Ok(Json(tenders))
}

async fn edit_tender(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
    Json(payload): Json<UpdateTenderRequest>,
) -> Result<Json<Tender>, AppError> {
    let tender_id = parse_tender_id(&id)?;
    require_username(&query.username)?;
    payload.validate()?;

    let tender = state
        .tenders
        .edit(tender_id, payload, &query.username)
        .await?;
    Ok(Json(tender))
}

async fn rollback_tender(
    State(state): State<AppState>,
    Path((id, version)): Path<(String, i32)>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Tender>, AppError> {
    let tender_id = parse_tender_id(&id)?;
    require_username(&query.username)?;

    let tender = state
        .tenders
        .rollback(tender_id, version, &query.username)
        .await?;
    Ok(Json(tender))
}

async fn tender_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TenderStatus>, AppError> {
    let tender_id = parse_tender_id(&id)?;

    let status = state.tenders.status_of(tender_id).await?;
    Ok(Json(status))
}

/// Status-only update; goes through the same engine edit path so the
/// transition policy cannot be bypassed.
async fn set_tender_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Tender>, AppError> {
    let tender_id = parse_tender_id(&id)?;
    require_username(&query.username)?;

    let patch = UpdateTenderRequest {
        status: Some(query.status),
        ..Default::default()
    };
    let tender = state
        .tenders
        .edit(tender_id, patch, &query.username)
        .await?;
    Ok(Json(tender))
}
