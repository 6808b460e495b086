//! Input validation helpers
//!
//! Text length limits for employee records, applied on top of the
//! required-field and email checks every store performs.

use shared::models::{EmployeeDraft, FieldErrors};
use shared::store::StoreError;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person names
pub const MAX_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Extension, floor
pub const MAX_SHORT_TEXT_LEN: usize = 32;

/// Department, role
pub const MAX_LABEL_LEN: usize = 200;

/// Avatar URLs
pub const MAX_URL_LEN: usize = 2048;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

fn check_len(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    // Missing fields already carry a message; keep the first one
    if errors.get(field).is_some() {
        return;
    }
    let len = value.chars().count();
    if len > max_len {
        errors.insert(
            field,
            format!("{} is too long ({len} chars, max {max_len})", label(field)),
        );
    }
}

fn label(field: &str) -> &str {
    match field {
        "first_name" => "First name",
        "last_name" => "Last name",
        "email" => "Email",
        "extension" => "Extension",
        "department" => "Department",
        "role" => "Role",
        "floor" => "Floor",
        "avatar" => "Avatar",
        other => other,
    }
}

/// Collect every field problem of an employee draft
pub fn employee_field_errors(draft: &EmployeeDraft) -> FieldErrors {
    let mut errors = draft.validate();
    check_len(&mut errors, "first_name", &draft.first_name, MAX_NAME_LEN);
    check_len(&mut errors, "last_name", &draft.last_name, MAX_NAME_LEN);
    check_len(&mut errors, "email", &draft.email, MAX_EMAIL_LEN);
    check_len(&mut errors, "extension", &draft.extension, MAX_SHORT_TEXT_LEN);
    check_len(&mut errors, "department", &draft.department, MAX_LABEL_LEN);
    check_len(&mut errors, "role", &draft.role, MAX_LABEL_LEN);
    check_len(&mut errors, "floor", &draft.floor, MAX_SHORT_TEXT_LEN);
    if let Some(avatar) = &draft.avatar {
        check_len(&mut errors, "avatar", avatar, MAX_URL_LEN);
    }
    errors
}

/// Validate an employee draft, returning a 400 with per-field details
pub fn validate_employee(draft: &EmployeeDraft) -> Result<(), AppError> {
    employee_field_errors(draft)
        .into_result()
        .map_err(|fields| StoreError::Validation(fields).into())
}

/// Validate login input lengths
pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    if email.len() > MAX_EMAIL_LEN || password.len() > MAX_PASSWORD_LEN {
        // Oversized credentials can never match; answer like a wrong password
        return Err(AppError::invalid_credentials());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn draft() -> EmployeeDraft {
        EmployeeDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@corp.example".into(),
            extension: "1815".into(),
            department: "Engineering".into(),
            role: "Analyst".into(),
            floor: "3".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_employee(&draft()).is_ok());
    }

    #[test]
    fn test_too_long_name() {
        let mut d = draft();
        d.first_name = "x".repeat(MAX_NAME_LEN + 1);
        let errors = employee_field_errors(&d);
        assert_eq!(errors.len(), 1);
        assert!(errors.get("first_name").unwrap().contains("too long"));
    }

    #[test]
    fn test_required_message_wins_over_length() {
        let mut d = draft();
        d.floor = " ".repeat(MAX_SHORT_TEXT_LEN + 5);
        let errors = employee_field_errors(&d);
        assert_eq!(errors.get("floor"), Some("Floor is required"));
    }

    #[test]
    fn test_validation_error_carries_fields() {
        let mut d = draft();
        d.email = "nope".into();
        d.role = String::new();
        let err = validate_employee(&d).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["email"], "Invalid email format");
        assert_eq!(details["role"], "Role is required");
    }

    #[test]
    fn test_login_input() {
        assert!(validate_login("a@b.c", "secret").is_ok());
        assert_eq!(
            validate_login("", "secret").unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        let long = "p".repeat(MAX_PASSWORD_LEN + 1);
        assert_eq!(
            validate_login("a@b.c", &long).unwrap_err().code,
            ErrorCode::InvalidCredentials
        );
    }
}
