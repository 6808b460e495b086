//! Record store contract
//!
//! Implemented by the SurrealDB repository on the server and by the HTTP
//! client on the other side of the wire.

use crate::error::{AppError, ErrorCode};
use crate::models::{Employee, EmployeeDraft, FieldErrors};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Field-level problems; surfaced inline, never reaches the backend
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    /// Target record vanished between read and mutation
    #[error("Employee {0} not found")]
    NotFound(String),
    /// Transport or backend failure; retryable by the user
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Validate form data before it goes anywhere near a store
pub fn validate_draft(draft: &EmployeeDraft) -> StoreResult<()> {
    draft.validate().into_result().map_err(StoreError::Validation)
}

/// A full record set stamped with the revision it was read at
///
/// Every successful mutation bumps the revision, so a list request that
/// was in flight during a mutation is recognisable as stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub revision: u64,
    pub employees: Vec<Employee>,
}

impl RecordSet {
    pub fn new(revision: u64, employees: Vec<Employee>) -> Self {
        Self {
            revision,
            employees,
        }
    }

    /// Adopt `incoming` unless it is older than what we already hold
    ///
    /// Returns whether the set was replaced.
    pub fn replace_if_newer(&mut self, incoming: RecordSet) -> bool {
        if incoming.revision < self.revision {
            tracing::debug!(
                held = self.revision,
                incoming = incoming.revision,
                "Discarding stale record set"
            );
            return false;
        }
        *self = incoming;
        true
    }

    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}

/// Async CRUD over employee records
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Full current record set
    async fn list(&self) -> StoreResult<RecordSet>;

    /// Insert a record, returning its new id
    async fn create(&self, draft: EmployeeDraft) -> StoreResult<String>;

    /// Replace every field of an existing record; the id is preserved
    async fn update(&self, id: &str, draft: EmployeeDraft) -> StoreResult<()>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(fields) => {
                fields
                    .iter()
                    .fold(AppError::validation("Validation failed"), |e, (k, v)| {
                        e.with_detail(k, v)
                    })
            }
            StoreError::NotFound(id) => AppError::employee_not_found(id),
            StoreError::Unavailable(msg) => AppError::store_unavailable(msg),
        }
    }
}

impl From<AppError> for StoreError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let mut fields = FieldErrors::default();
                for (k, v) in err.details.iter().flatten() {
                    if let Some(msg) = v.as_str() {
                        fields.insert(k.as_str(), msg);
                    }
                }
                if fields.is_empty() {
                    fields.insert("form", err.message);
                }
                StoreError::Validation(fields)
            }
            ErrorCode::EmployeeNotFound | ErrorCode::NotFound => {
                let id = err
                    .details
                    .as_ref()
                    .and_then(|d| d.get("id"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                StoreError::NotFound(id)
            }
            _ => StoreError::Unavailable(err.message),
        }
    }
}
