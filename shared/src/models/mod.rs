//! Data models
//!
//! Shared between phonebook-server, phonebook-client and any frontend (via API).
//! Record ids are opaque strings assigned by the store.

pub mod employee;

// Re-exports
pub use employee::*;
