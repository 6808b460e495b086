//! Request/response types shared between server and client
//!
//! These types are shared between phonebook-server and phonebook-client.

use crate::directory::{QueryState, SortOrder, Surface, ViewMode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub user: AdminInfo,
}

/// Signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
}

// =============================================================================
// Employee API DTOs
// =============================================================================

/// Result of a create/update/delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub id: String,
    /// Record-set revision after the mutation
    pub revision: u64,
}

/// Query string of the directory and admin list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

impl DirectoryParams {
    /// Build query state for `surface`; missing parameters keep defaults
    pub fn into_query(self, surface: Surface) -> QueryState {
        let mut query = QueryState::new(surface);
        if let Some(q) = self.q {
            query.set_search_term(q);
        }
        if let Some(department) = self.department {
            query.set_department(department);
        }
        if let Some(floor) = self.floor {
            query.set_floor(floor);
        }
        if let Some(view) = self.view {
            query.set_view_mode(view);
        }
        if let Some(sort) = self.sort {
            query.set_sort(sort);
        }
        query.with_page(self.page.unwrap_or(1))
    }

    pub fn from_query(query: &QueryState) -> Self {
        let non_default = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            q: non_default(query.search_term()),
            department: query.department().map(str::to_string),
            floor: query.floor().map(str::to_string),
            page: Some(query.page()),
            view: Some(query.view_mode()),
            sort: (query.sort() != SortOrder::Default).then_some(query.sort()),
        }
    }
}
