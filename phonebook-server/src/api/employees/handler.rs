//! Employee Management Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::client::{DirectoryParams, MutationResponse};
use shared::directory::{Surface, ViewModel, compose};
use shared::models::EmployeeDraft;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate_employee;

/// Admin table page (with stats)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<DirectoryParams>,
) -> AppResult<Json<ViewModel>> {
    let set = state.employee_repository().snapshot().await?;
    let query = params.into_query(Surface::Admin);
    Ok(Json(compose(&set.employees, &query, &state.config.page_sizes)))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<EmployeeDraft>,
) -> AppResult<Json<MutationResponse>> {
    validate_employee(&payload)?;
    let res = state.employee_repository().insert(payload).await?;
    tracing::info!(admin_id = %user.id, employee_id = %res.id, "Employee created by admin");
    Ok(Json(res))
}

/// Replace an employee's fields
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeDraft>,
) -> AppResult<Json<MutationResponse>> {
    validate_employee(&payload)?;
    let res = state.employee_repository().replace(&id, payload).await?;
    tracing::info!(admin_id = %user.id, employee_id = %id, "Employee updated by admin");
    Ok(Json(res))
}

/// Delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MutationResponse>> {
    let res = state.employee_repository().remove(&id).await?;
    tracing::info!(admin_id = %user.id, employee_id = %id, "Employee deleted by admin");
    Ok(Json(res))
}
