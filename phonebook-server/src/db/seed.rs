//! Seed data
//!
//! Loads a JSON array of employee drafts and inserts it into an empty store.

use std::path::Path;

use shared::models::EmployeeDraft;

use super::repository::{EmployeeRepository, RepoResult};
use crate::core::ServerError;
use crate::utils::validation::employee_field_errors;

/// Read a seed file: a JSON array of employee drafts
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<EmployeeDraft>, ServerError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        ServerError::Config(format!("Invalid seed file {}: {}", path.display(), e))
    })
}

/// Insert the drafts when the store holds no employees
///
/// Invalid drafts are skipped with a warning. Returns the number inserted.
pub async fn seed_if_empty(
    repo: &EmployeeRepository,
    drafts: Vec<EmployeeDraft>,
) -> RepoResult<usize> {
    if repo.count().await? > 0 {
        tracing::debug!("Employee table not empty, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for (index, draft) in drafts.into_iter().enumerate() {
        let errors = employee_field_errors(&draft);
        if !errors.is_empty() {
            tracing::warn!(index, errors = %errors, "Skipping invalid seed record");
            continue;
        }
        repo.insert(draft).await?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResourceVersions;
    use crate::db::DbService;
    use std::io::Write;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const SEED: &str = r#"[
        {"first_name":"Grace","last_name":"Hopper","email":"grace@corp.example",
         "extension":"101","department":"Engineering","role":"Admiral","floor":"2"},
        {"first_name":"","last_name":"Nobody","email":"bad",
         "extension":"","department":"","role":"","floor":""},
        {"first_name":"Alan","last_name":"Turing","email":"alan@corp.example",
         "extension":"102","department":"Research","role":"Scientist","floor":"3",
         "avatar":"https://img.example/alan.png"}
    ]"#;

    async fn repo() -> EmployeeRepository {
        let db = DbService::memory().await.unwrap().db;
        EmployeeRepository::new(
            db,
            Arc::new(ResourceVersions::new()),
            Arc::new(Mutex::new(())),
        )
    }

    #[test]
    fn test_load_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();

        let drafts = load_seed_file(file.path()).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[2].avatar.as_deref(), Some("https://img.example/alan.png"));
    }

    #[test]
    fn test_load_malformed_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            load_seed_file(file.path()),
            Err(ServerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let repo = repo().await;
        let drafts: Vec<EmployeeDraft> = serde_json::from_str(SEED).unwrap();

        assert_eq!(seed_if_empty(&repo, drafts.clone()).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&repo, drafts).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
