//! Directory API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::client::DirectoryParams;
use shared::directory::{Surface, ViewModel, compose};
use shared::store::RecordSet;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Full record set stamped with its revision
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<RecordSet>> {
    let set = state.employee_repository().snapshot().await?;
    Ok(Json(set))
}

/// Filtered, sorted and paginated directory page
pub async fn directory(
    State(state): State<ServerState>,
    Query(params): Query<DirectoryParams>,
) -> AppResult<Json<ViewModel>> {
    let set = state.employee_repository().snapshot().await?;
    let query = params.into_query(Surface::Directory);
    Ok(Json(compose(&set.employees, &query, &state.config.page_sizes)))
}
