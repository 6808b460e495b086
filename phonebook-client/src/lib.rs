//! Phonebook Client - HTTP client and presentation controllers
//!
//! [`HttpClient`] implements the record store and identity contracts over the
//! phonebook-server API. [`DirectoryController`] and [`AdminController`] own
//! the record set and query state for the two surfaces and recompose the
//! view-model on every change.

pub mod config;
pub mod controllers;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use controllers::{AdminController, AdminError, AdminView, DirectoryController, EmployeeForm};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::client::{AdminInfo, DirectoryParams, LoginResponse, MutationResponse};
pub use shared::session::{AuthError, IdentityProvider, Session};
pub use shared::store::{EmployeeStore, RecordSet, StoreError};
