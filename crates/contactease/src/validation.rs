//! Field validation rules.
//!
//! Each validator is a pure pass/fail check. Retrying, prompting and
//! re-asking belong to whatever front end drives the
//! [`ContactManager`](crate::manager::ContactManager).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::error::{Error, Result};

/// Required length of a phone number.
pub const PHONE_DIGITS: usize = 10;

/// One `@`, at least one `.` after it, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// A field of a [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The given name.
    FirstName,
    /// The family name.
    LastName,
    /// The phone number.
    PhoneNumber,
    /// The email address.
    Email,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Self; 4] = [
        Self::FirstName,
        Self::LastName,
        Self::PhoneNumber,
        Self::Email,
    ];

    /// Run this field's validator.
    #[must_use]
    pub fn is_valid(self, value: &str) -> bool {
        match self {
            Self::FirstName | Self::LastName => valid_name(value),
            Self::PhoneNumber => valid_phone(value),
            Self::Email => valid_email(value),
        }
    }

    /// The message shown when a value is rejected.
    #[must_use]
    pub fn rule(self) -> &'static str {
        match self {
            Self::FirstName | Self::LastName => {
                "only letters, spaces and hyphens are allowed"
            }
            Self::PhoneNumber => "must be exactly 10 digits with no separators",
            Self::Email => "must look like name@domain.tld",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstName => write!(f, "first name"),
            Self::LastName => write!(f, "last name"),
            Self::PhoneNumber => write!(f, "phone number"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Non-empty, and only alphabetic characters, spaces and hyphens.
#[must_use]
pub fn valid_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphabetic() || c == ' ' || c == '-')
}

/// Exactly ten ASCII digits.
#[must_use]
pub fn valid_phone(s: &str) -> bool {
    s.len() == PHONE_DIGITS && s.bytes().all(|b| b.is_ascii_digit())
}

/// A `local@domain.tld` shaped address.
#[must_use]
pub fn valid_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Validate a single field value.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the field if the value is rejected.
pub fn validate_field(field: Field, value: &str) -> Result<()> {
    if field.is_valid(value) {
        Ok(())
    } else if value.is_empty() {
        Err(Error::validation(field, "must not be empty"))
    } else {
        Err(Error::validation(field, field.rule()))
    }
}

/// Validate every field of a contact, in record order.
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first field that is rejected.
pub fn validate_contact(contact: &Contact) -> Result<()> {
    for (field, value) in Field::ALL.into_iter().zip(contact.fields()) {
        validate_field(field, value)?;
    }
    Ok(())
}
