//! Presentation controllers
//!
//! Each controller owns a record set and a query state and recomposes its
//! view-model after every change. Rendering is left to the caller.

mod admin;
mod directory;

pub use admin::{AdminController, AdminError, AdminView, EmployeeForm};
pub use directory::DirectoryController;
