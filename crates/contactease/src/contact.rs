//! The contact record.
//!
//! A [`Contact`] is a plain data holder. It never validates itself; the
//! [`ContactManager`](crate::manager::ContactManager) only ever stores
//! records whose fields have passed [`validation`](crate::validation).

use serde::{Deserialize, Serialize};

/// Column headers, in the same order as [`Contact::fields`].
pub const FIELD_HEADERS: [&str; 4] = ["First Name", "Last Name", "Phone Number", "Email"];

/// One entry in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Ten decimal digits, no separators.
    pub phone_number: String,

    /// Address of the form `local@domain.tld`.
    pub email: String,
}

impl Contact {
    /// Create a contact from raw field values.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Field values in display and serialization order.
    #[must_use]
    pub fn fields(&self) -> [&str; 4] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.phone_number.as_str(),
            self.email.as_str(),
        ]
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against the first, last or full name.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.first_name.to_lowercase().contains(&query)
            || self.last_name.to_lowercase().contains(&query)
            || self.full_name().to_lowercase().contains(&query)
    }

    /// Whether both names match the given ones, ignoring case.
    #[must_use]
    pub fn same_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name.to_lowercase() == first_name.to_lowercase()
            && self.last_name.to_lowercase() == last_name.to_lowercase()
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, Phone: {}, Email: {}",
            self.first_name, self.last_name, self.phone_number, self.email
        )
    }
}
