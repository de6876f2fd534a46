//! Employee API endpoints (read-only directory)

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    db::EntityStore,
    models::Employee,
    utils::{validate_username, AppError},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees))
        .route("/{username}", get(get_employee))
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.store.list_employees().await.map_err(|e| {
        tracing::error!("Failed to list employees: {}", e);
        AppError::internal("Failed to list employees")
    })?;

    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Employee>, AppError> {
    if !validate_username(&username) {
        return Err(AppError::bad_request("Invalid username"));
    }

    let employee = state
        .store
        .employee_by_username(&username)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get employee: {}", e);
            AppError::internal("Failed to get employee")
        })?;

    match employee {
        Some(e) => Ok(Json(e)),
        None => Err(AppError::not_found("Employee not found")),
    }
}
