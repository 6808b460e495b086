//! Employee Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One employee's directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the store at creation, never changes afterwards
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub extension: String,
    pub department: String,
    pub role: String,
    pub floor: String,
    /// Avatar image reference (URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Employee {
    /// Build a record from form data and a store-assigned id
    pub fn from_draft(id: impl Into<String>, draft: EmployeeDraft) -> Self {
        Self {
            id: id.into(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            extension: draft.extension,
            department: draft.department,
            role: draft.role,
            floor: draft.floor,
            avatar: draft.avatar,
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Avatar fallback: first letter of each name part, uppercased
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Form data for editing this record
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            extension: self.extension.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
            floor: self.floor.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Employee form data (a record without its id)
///
/// Accepted by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub extension: String,
    pub department: String,
    pub role: String,
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl EmployeeDraft {
    /// Check every field and collect one message per offending field
    ///
    /// Runs before any store call. An empty result means the draft is valid.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        require(&mut errors, "first_name", &self.first_name, "First name is required");
        require(&mut errors, "last_name", &self.last_name, "Last name is required");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Invalid email format");
        }
        require(&mut errors, "extension", &self.extension, "Extension is required");
        require(&mut errors, "department", &self.department, "Department is required");
        require(&mut errors, "role", &self.role, "Role is required");
        require(&mut errors, "floor", &self.floor, "Floor is required");

        errors
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

/// Simple `local@domain.tld` check
///
/// No whitespace, exactly one `@` with text on both sides, and a `.` inside
/// the domain with at least one character before and after it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}
