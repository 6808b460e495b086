//! Admin Repository

use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::auth::{hash_password, verify_password};

/// Admin account
#[derive(Debug, Clone, Deserialize)]
pub struct AdminRecord {
    pub id: String,
    pub email: String,
    pub hash_pass: String,
}

impl AdminRecord {
    /// Verify a plain password against the stored hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(password, &self.hash_pass)
    }
}

#[derive(Debug, Serialize)]
struct AdminDoc {
    email: String,
    hash_pass: String,
    created_at: i64,
}

const SELECT_FIELDS: &str = "record::id(id) AS id, email, hash_pass";

/// Emails are matched case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find admin by login email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<AdminRecord>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM admin WHERE email = $email LIMIT 1"
            ))
            .bind(("email", normalize_email(email)))
            .await?;
        let admins: Vec<AdminRecord> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Find admin by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<AdminRecord>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM type::thing('admin', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?;
        let admins: Vec<AdminRecord> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Create the admin account unless one with this email already exists
    ///
    /// An existing account keeps its password.
    pub async fn ensure(&self, email: &str, password: &str) -> RepoResult<AdminRecord> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }

        let hash_pass = hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        let doc = AdminDoc {
            email: normalize_email(email),
            hash_pass,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        self.base
            .db()
            .query("CREATE type::thing('admin', $id) CONTENT $data")
            .bind(("id", id.clone()))
            .bind(("data", doc))
            .await?
            .check()?;

        tracing::info!(admin_id = %id, email = %normalize_email(email), "Admin account created");
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }
}
