//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod admin;
pub mod employee;

pub use admin::{AdminRecord, AdminRepository};
pub use employee::EmployeeRepository;

use shared::models::FieldErrors;
use shared::store::StoreError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for StoreError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => StoreError::NotFound(id),
            RepoError::Database(msg) => StoreError::Unavailable(msg),
            RepoError::Validation(fields) => StoreError::Validation(fields),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        StoreError::from(err).into()
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention
// =============================================================================
//
// 记录 ID 为 uuid (simple 格式)，对外只暴露纯 ID：
//   - 定位: type::thing('employee', $id)
//   - 读取: SELECT record::id(id) AS id ...

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
