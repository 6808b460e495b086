//! Shared types for the phonebook workspace
//!
//! Domain models, the unified error system, the pure directory core
//! (filter, floor sort, pagination, view-model) and the async contracts
//! that both the server and the client implement.

pub mod client;
pub mod directory;
pub mod error;
pub mod models;
pub mod session;
pub mod store;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use directory::{QueryState, ViewModel, compose};
pub use models::{Employee, EmployeeDraft, FieldErrors};
pub use store::{EmployeeStore, RecordSet, StoreError};
