//! Employee Repository
//!
//! Every mutation takes the shared write lock, so writes apply in arrival
//! order and each successful one bumps the record-set revision exactly once.
//! Snapshots take the same lock: one revision always names one content.
//! The last revision is stored alongside the records so it survives restarts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::client::MutationResponse;
use shared::models::{Employee, EmployeeDraft};
use shared::store::{EmployeeStore, RecordSet, StoreResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use super::{BaseRepository, RepoError, RepoResult};
use crate::core::ResourceVersions;
use crate::utils::validation::employee_field_errors;

/// Resource name used for revision tracking and the table name
pub const RESOURCE: &str = "employee";

const SELECT_FIELDS: &str = "record::id(id) AS id, first_name, last_name, email, extension, \
     department, role, floor, avatar, seq, created_at";

/// Stored document (without the record id)
#[derive(Debug, Serialize)]
struct EmployeeDoc {
    first_name: String,
    last_name: String,
    email: String,
    extension: String,
    department: String,
    role: String,
    floor: String,
    avatar: Option<String>,
    /// Insertion sequence, keeps the list in creation order
    seq: u64,
    created_at: i64,
    updated_at: i64,
}

impl EmployeeDoc {
    fn new(draft: EmployeeDraft, seq: u64, created_at: i64, updated_at: i64) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            extension: draft.extension,
            department: draft.department,
            role: draft.role,
            floor: draft.floor,
            avatar: draft.avatar.filter(|a| !a.trim().is_empty()),
            seq,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    extension: String,
    department: String,
    role: String,
    floor: String,
    #[serde(default)]
    avatar: Option<String>,
    seq: u64,
    #[serde(default)]
    created_at: i64,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            extension: row.extension,
            department: row.department,
            role: row.role,
            floor: row.floor,
            avatar: row.avatar,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: usize,
}

#[derive(Debug, Deserialize)]
struct RevisionRow {
    revision: u64,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
    versions: Arc<ResourceVersions>,
    write_lock: Arc<Mutex<()>>,
}

impl EmployeeRepository {
    pub fn new(
        db: Surreal<Db>,
        versions: Arc<ResourceVersions>,
        write_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            base: BaseRepository::new(db),
            versions,
            write_lock,
        }
    }

    /// Current record-set revision
    pub fn revision(&self) -> u64 {
        self.versions.get(RESOURCE)
    }

    /// Raise the in-memory revision to the last persisted one
    ///
    /// Run once at startup, after the clock-based seed.
    pub async fn restore_revision(&self) -> RepoResult<u64> {
        let rows: Vec<RevisionRow> = self
            .base
            .db()
            .query("SELECT revision FROM type::thing('resource_version', $resource)")
            .bind(("resource", RESOURCE))
            .await?
            .take(0)?;
        if let Some(row) = rows.into_iter().next() {
            self.versions.seed(RESOURCE, row.revision);
        }
        Ok(self.revision())
    }

    /// Bump the revision and persist it; caller holds the write lock
    async fn bump_revision(&self) -> u64 {
        let revision = self.versions.increment(RESOURCE);
        let persisted = self
            .base
            .db()
            .query("UPSERT type::thing('resource_version', $resource) SET revision = $revision")
            .bind(("resource", RESOURCE))
            .bind(("revision", revision))
            .await
            .and_then(|r| r.check().map(|_| ()));
        if let Err(e) = persisted {
            tracing::warn!(error = %e, revision, "Failed to persist employee revision");
        }
        revision
    }

    /// All employees in creation order, stamped with the revision
    ///
    /// Holds the write lock so no mutation can land between reading the
    /// revision and reading the rows.
    pub async fn snapshot(&self) -> RepoResult<RecordSet> {
        let _guard = self.write_lock.lock().await;
        let revision = self.revision();
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!("SELECT {SELECT_FIELDS} FROM employee ORDER BY seq ASC"))
            .await?
            .take(0)?;
        Ok(RecordSet::new(
            revision,
            rows.into_iter().map(Employee::from).collect(),
        ))
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        Ok(self.find_row(id).await?.map(Employee::from))
    }

    async fn find_row(&self, id: &str) -> RepoResult<Option<EmployeeRow>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM type::thing('employee', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<EmployeeRow> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Number of stored employees
    pub async fn count(&self) -> RepoResult<usize> {
        let row: Option<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS total FROM employee GROUP ALL")
            .await?
            .take(0)?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    /// Create a new employee; the store assigns the id
    pub async fn insert(&self, draft: EmployeeDraft) -> RepoResult<MutationResponse> {
        employee_field_errors(&draft)
            .into_result()
            .map_err(RepoError::Validation)?;

        let _guard = self.write_lock.lock().await;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let now = chrono::Utc::now().timestamp_millis();
        let doc = EmployeeDoc::new(draft, self.revision(), now, now);

        self.base
            .db()
            .query("CREATE type::thing('employee', $id) CONTENT $data")
            .bind(("id", id.clone()))
            .bind(("data", doc))
            .await?
            .check()?;

        let revision = self.bump_revision().await;
        tracing::info!(id = %id, revision, "Employee created");
        Ok(MutationResponse { id, revision })
    }

    /// Replace every field of an existing employee
    pub async fn replace(&self, id: &str, draft: EmployeeDraft) -> RepoResult<MutationResponse> {
        employee_field_errors(&draft)
            .into_result()
            .map_err(RepoError::Validation)?;

        let _guard = self.write_lock.lock().await;
        let existing = self
            .find_row(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let now = chrono::Utc::now().timestamp_millis();
        let doc = EmployeeDoc::new(draft, existing.seq, existing.created_at, now);

        self.base
            .db()
            .query("UPDATE type::thing('employee', $id) CONTENT $data")
            .bind(("id", id.to_string()))
            .bind(("data", doc))
            .await?
            .check()?;

        let revision = self.bump_revision().await;
        tracing::info!(id = %id, revision, "Employee updated");
        Ok(MutationResponse {
            id: id.to_string(),
            revision,
        })
    }

    /// Hard delete an employee
    pub async fn remove(&self, id: &str) -> RepoResult<MutationResponse> {
        let _guard = self.write_lock.lock().await;
        if self.find_row(id).await?.is_none() {
            return Err(RepoError::NotFound(id.to_string()));
        }

        self.base
            .db()
            .query("DELETE type::thing('employee', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;

        let revision = self.bump_revision().await;
        tracing::info!(id = %id, revision, "Employee deleted");
        Ok(MutationResponse {
            id: id.to_string(),
            revision,
        })
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepository {
    async fn list(&self) -> StoreResult<RecordSet> {
        Ok(self.snapshot().await?)
    }

    async fn create(&self, draft: EmployeeDraft) -> StoreResult<String> {
        Ok(self.insert(draft).await?.id)
    }

    async fn update(&self, id: &str, draft: EmployeeDraft) -> StoreResult<()> {
        self.replace(id, draft).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.remove(id).await?;
        Ok(())
    }
}
