//! Database Module
//!
//! Embedded SurrealDB, either in memory or on RocksDB under `work_dir/database`.

pub mod repository;
pub mod seed;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::{Config, DatabaseMode};
use crate::utils::AppError;

/// SurrealDB namespace
pub const NAMESPACE: &str = "phonebook";
/// SurrealDB database
pub const DATABASE: &str = "directory";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database selected by the configuration
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        match config.database_mode {
            DatabaseMode::Memory => Self::memory().await,
            DatabaseMode::RocksDb => {
                let path = config.database_dir();
                let db = Surreal::new::<RocksDb>(path.to_string_lossy().into_owned())
                    .await
                    .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
                tracing::info!(path = %path.display(), "Database opened (RocksDB)");
                Self::select(db).await
            }
        }
    }

    /// In-memory database (tests, demos)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!("Database opened (memory)");
        Self::select(db).await
    }

    async fn select(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}
