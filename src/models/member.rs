//! Member model
//!
//! A registered library member and the draft/validation types for editing one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A library member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl Member {
    pub fn new(id: MemberId, fields: MemberFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    pub fn apply(&mut self, fields: MemberFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
    }

    /// Normalize an email address for uniqueness comparisons
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Check if this member uses the given email (case-insensitive)
    pub fn matches_email(&self, email: &str) -> bool {
        Self::normalize_email(&self.email) == Self::normalize_email(email)
    }

    /// Label used in selector lists
    pub fn option_label(&self) -> String {
        format!("{} - {} ({})", self.id, self.name, self.email)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Minimal address shape: exactly one '@' and at least one '.'
pub fn is_plausible_email(email: &str) -> bool {
    email.matches('@').count() == 1 && email.contains('.')
}

/// Raw, unvalidated input for adding or editing a member
#[derive(Debug, Clone, Default)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Member fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl MemberDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone,
        }
    }

    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
        }
    }

    pub fn validate(&self) -> Result<MemberFields, MemberValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(MemberValidationError::MissingFields);
        }

        if !is_plausible_email(email) {
            return Err(MemberValidationError::InvalidEmail(email.to_string()));
        }

        // An empty phone means "no phone"
        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(MemberFields {
            name: name.to_string(),
            email: email.to_string(),
            phone,
        })
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    MissingFields,
    InvalidEmail(String),
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Name and Email are required"),
            Self::InvalidEmail(email) => {
                write!(f, "Please enter a valid email address (got '{}')", email)
            }
        }
    }
}

impl std::error::Error for MemberValidationError {}
