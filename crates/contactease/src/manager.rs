//! The address book manager.
//!
//! [`ContactManager`] owns the in-memory collection, applies the field
//! validators and the duplicate rule, and writes the whole collection back to
//! its [`ContactStore`] after every add, modify and delete.
//!
//! Operations that act on a single existing contact take a free-text query
//! plus an optional 1-based selection. When the query matches several
//! contacts and no selection is given, the call fails with
//! [`Error::Ambiguous`] carrying the candidates so the caller can ask the
//! user and try again.
//!
//! # Example
//!
//! ```no_run
//! use contactease::{ContactManager, ContactUpdate};
//!
//! let mut manager = ContactManager::open("contacts.json")?;
//! manager.add_contact("Ana", "Lee", "5551234567", "ana@x.com")?;
//!
//! let update = ContactUpdate::new().phone_number("5559999999");
//! manager.modify_contact("ana", None, &update)?;
//! manager.delete_contact("Ana Lee", None)?;
//! # Ok::<(), contactease::Error>(())
//! ```

use std::path::Path;

use tracing::{debug, info, warn};

use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::store::ContactStore;
use crate::validation::validate_contact;

/// What to do when new values collide with an existing contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`Error::Duplicate`].
    #[default]
    Reject,
    /// Store the contact anyway.
    Allow,
}

/// Replacement values for a contact. Unset or blank fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

impl ContactUpdate {
    /// An update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name.
    #[must_use]
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name.
    #[must_use]
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn phone_number(mut self, value: impl Into<String>) -> Self {
        self.phone_number = Some(value.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Whether applying this update would leave every field unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.phone_number,
            &self.email,
        ]
        .iter()
        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    /// Build the replacement record for `current`.
    #[must_use]
    pub fn apply(&self, current: &Contact) -> Contact {
        fn pick(new: Option<&str>, old: &str) -> String {
            match new.map(str::trim) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => old.to_string(),
            }
        }

        Contact {
            first_name: pick(self.first_name.as_deref(), &current.first_name),
            last_name: pick(self.last_name.as_deref(), &current.last_name),
            phone_number: pick(self.phone_number.as_deref(), &current.phone_number),
            email: pick(self.email.as_deref(), &current.email),
        }
    }
}

/// Owns the address book and keeps it in sync with its store.
#[derive(Debug)]
pub struct ContactManager {
    /// Where the collection is persisted.
    store: ContactStore,
    /// The collection, in insertion order.
    contacts: Vec<Contact>,
}

impl ContactManager {
    /// Open the address book stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_store(ContactStore::new(path))
    }

    /// Open the address book held by `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    pub fn with_store(store: ContactStore) -> Result<Self> {
        let mut manager = Self {
            store,
            contacts: Vec::new(),
        };
        manager.load_contacts()?;
        Ok(manager)
    }

    /// Replace the in-memory collection with the store's contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the store cannot be parsed; the
    /// in-memory collection is left unchanged in that case.
    pub fn load_contacts(&mut self) -> Result<()> {
        self.contacts = self.store.load()?;
        info!(
            "Opened address book with {} contacts at {}",
            self.contacts.len(),
            self.store.path().display()
        );
        Ok(())
    }

    /// Write the whole collection to the store.
    ///
    /// Mutating operations call this themselves. It is public so a caller can
    /// retry after an [`Error::Persistence`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_contacts(&self) -> Result<()> {
        self.store.save(&self.contacts)
    }

    /// Get the path of the backing store.
    #[must_use]
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the address book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Add a new contact, rejecting duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a malformed field,
    /// [`Error::Duplicate`] if the contact already exists, and a store error
    /// if saving fails (the contact stays in memory).
    pub fn add_contact(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email: &str,
    ) -> Result<Contact> {
        self.add_contact_with(
            first_name,
            last_name,
            phone_number,
            email,
            DuplicatePolicy::Reject,
        )
    }

    /// Add a new contact with an explicit duplicate policy.
    ///
    /// # Errors
    ///
    /// See [`add_contact`](Self::add_contact).
    pub fn add_contact_with(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email: &str,
        policy: DuplicatePolicy,
    ) -> Result<Contact> {
        let contact = Contact::new(
            first_name.trim(),
            last_name.trim(),
            phone_number.trim(),
            email.trim(),
        );
        validate_contact(&contact)?;

        if policy == DuplicatePolicy::Reject {
            if let Some(existing) = self.find_duplicate(&contact, None) {
                warn!("Rejected duplicate contact {}", contact.full_name());
                return Err(Error::duplicate(existing.clone()));
            }
        }

        self.contacts.push(contact.clone());
        self.save_contacts()?;
        info!("Added contact {}", contact.full_name());
        Ok(contact)
    }

    /// All contacts in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoContacts`] if the address book is empty.
    pub fn list_contacts(&self) -> Result<&[Contact]> {
        if self.contacts.is_empty() {
            return Err(Error::NoContacts);
        }
        Ok(&self.contacts)
    }

    /// Contacts whose first, last or full name contains `query`, ignoring
    /// case. An empty result means nothing matched.
    #[must_use]
    pub fn search_contact(&self, query: &str) -> Vec<Contact> {
        self.candidates(query)
            .into_iter()
            .map(|(_, c)| c.clone())
            .collect()
    }

    /// Matching contacts paired with their position in the collection.
    #[must_use]
    pub fn candidates(&self, query: &str) -> Vec<(usize, &Contact)> {
        let query = query.trim();
        let found: Vec<_> = self
            .contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(query))
            .collect();
        debug!("Query '{}' matched {} contacts", query, found.len());
        found
    }

    /// Whether a contact with these values would be a duplicate.
    ///
    /// Two records are duplicates when both names match ignoring case and
    /// either the phone number or the email matches exactly.
    #[must_use]
    pub fn is_duplicate(
        &self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email: &str,
    ) -> bool {
        let probe = Contact::new(
            first_name.trim(),
            last_name.trim(),
            phone_number.trim(),
            email.trim(),
        );
        self.find_duplicate(&probe, None).is_some()
    }

    fn find_duplicate(&self, probe: &Contact, skip: Option<usize>) -> Option<&Contact> {
        self.contacts
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, c)| c)
            .find(|c| {
                c.same_name(&probe.first_name, &probe.last_name)
                    && (c.phone_number == probe.phone_number || c.email == probe.email)
            })
    }

    /// Resolve a query and optional 1-based selection to a collection index.
    fn select(&self, query: &str, selection: Option<usize>) -> Result<usize> {
        let matches = self.candidates(query);
        let count = matches.len();

        match (count, selection) {
            (0, _) => Err(Error::not_found(query.trim())),
            (_, Some(index)) if index == 0 || index > count => {
                Err(Error::Selection { index, count })
            }
            (_, Some(index)) => Ok(matches[index - 1].0),
            (1, None) => Ok(matches[0].0),
            (_, None) => Err(Error::Ambiguous {
                candidates: matches.into_iter().map(|(_, c)| c.clone()).collect(),
            }),
        }
    }

    /// Replace the fields of one contact, rejecting duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches, [`Error::Ambiguous`]
    /// or [`Error::Selection`] if the target cannot be pinned down,
    /// [`Error::Validation`] for a malformed new value, [`Error::Duplicate`]
    /// if the result collides with another contact, and a store error if
    /// saving fails.
    pub fn modify_contact(
        &mut self,
        query: &str,
        selection: Option<usize>,
        update: &ContactUpdate,
    ) -> Result<Contact> {
        self.modify_contact_with(query, selection, update, DuplicatePolicy::Reject)
    }

    /// Replace the fields of one contact with an explicit duplicate policy.
    ///
    /// # Errors
    ///
    /// See [`modify_contact`](Self::modify_contact).
    pub fn modify_contact_with(
        &mut self,
        query: &str,
        selection: Option<usize>,
        update: &ContactUpdate,
        policy: DuplicatePolicy,
    ) -> Result<Contact> {
        let index = self.select(query, selection)?;
        let updated = update.apply(&self.contacts[index]);
        validate_contact(&updated)?;

        if policy == DuplicatePolicy::Reject {
            if let Some(existing) = self.find_duplicate(&updated, Some(index)) {
                warn!(
                    "Rejected modification of {}: collides with {}",
                    self.contacts[index].full_name(),
                    existing.full_name()
                );
                return Err(Error::duplicate(existing.clone()));
            }
        }

        self.contacts[index] = updated.clone();
        self.save_contacts()?;
        info!("Modified contact {}", updated.full_name());
        Ok(updated)
    }

    /// Remove one contact and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches, [`Error::Ambiguous`]
    /// or [`Error::Selection`] if the target cannot be pinned down, and a
    /// store error if saving fails.
    pub fn delete_contact(&mut self, query: &str, selection: Option<usize>) -> Result<Contact> {
        let index = self.select(query, selection)?;
        let removed = self.contacts.remove(index);
        self.save_contacts()?;
        info!("Deleted contact {}", removed.full_name());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use tempfile::TempDir;

    fn create_test_manager() -> (TempDir, ContactManager) {
        init_test_logging();
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let manager =
            ContactManager::open(dir.path().join("contacts.json")).expect("failed to open");
        (dir, manager)
    }

    fn add_ana(manager: &mut ContactManager) -> Contact {
        manager
            .add_contact("Ana", "Lee", "5551234567", "ana@x.com")
            .unwrap()
    }

    #[test]
    fn test_open_empty() {
        let (_dir, manager) = create_test_manager();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
    }

    #[test]
    fn test_open_corrupt_store_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "not json").unwrap();

        let err = ContactManager::open(&path).unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
    }

    #[test]
    fn test_add_contact() {
        let (_dir, mut manager) = create_test_manager();
        let added = add_ana(&mut manager);

        assert_eq!(added, Contact::new("Ana", "Lee", "5551234567", "ana@x.com"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_add_contact_trims_input() {
        let (_dir, mut manager) = create_test_manager();
        let added = manager
            .add_contact("  Ana ", "Lee\n", " 5551234567", "ana@x.com  ")
            .unwrap();
        assert_eq!(added.first_name, "Ana");
        assert_eq!(added.phone_number, "5551234567");
    }

    #[test]
    fn test_add_contact_persists_immediately() {
        let (dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let reopened = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_add_invalid_field_rejected() {
        let (_dir, mut manager) = create_test_manager();

        let err = manager
            .add_contact("John1", "Doe", "1234567890", "j@d.com")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: crate::validation::Field::FirstName,
                ..
            }
        ));

        let err = manager
            .add_contact("John", "Doe", "12345", "j@d.com")
            .unwrap_err();
        assert!(err.is_validation());

        let err = manager
            .add_contact("John", "Doe", "1234567890", "a@b")
            .unwrap_err();
        assert!(err.is_validation());

        assert!(manager.is_empty());
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let err = manager
            .add_contact("Ana", "Lee", "5551234567", "ana@x.com")
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let err = manager
            .add_contact("ANA", "lee", "5550000000", "ana@x.com")
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_same_name_different_phone_and_email_allowed() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        manager
            .add_contact("Ana", "Lee", "5550000000", "other@x.com")
            .unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_different_name_same_phone_allowed() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        manager
            .add_contact("Ben", "Lee", "5551234567", "ana@x.com")
            .unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_add_duplicate_allowed_when_forced() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        manager
            .add_contact_with(
                "Ana",
                "Lee",
                "5551234567",
                "ana@x.com",
                DuplicatePolicy::Allow,
            )
            .unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_is_duplicate() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        assert!(manager.is_duplicate("ana", "LEE", "5551234567", "new@x.com"));
        assert!(manager.is_duplicate("Ana", "Lee", "5550000000", "ana@x.com"));
        assert!(!manager.is_duplicate("Ana", "Lee", "5550000000", "new@x.com"));
        assert!(!manager.is_duplicate("Anna", "Lee", "5551234567", "ana@x.com"));
        // Email comparison is exact.
        assert!(!manager.is_duplicate("Ana", "Lee", "5550000000", "ANA@x.com"));
    }

    #[test]
    fn test_is_duplicate_agrees_with_add_on_padded_input() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        assert!(manager.is_duplicate("Ana ", " Lee", "5551234567 ", " new@x.com"));
        let err = manager
            .add_contact("Ana ", " Lee", "5551234567 ", " new@x.com")
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_list_contacts_empty() {
        let (_dir, manager) = create_test_manager();
        assert!(matches!(manager.list_contacts(), Err(Error::NoContacts)));
    }

    #[test]
    fn test_list_contacts_preserves_insertion_order() {
        let (_dir, mut manager) = create_test_manager();
        manager
            .add_contact("Zed", "Adams", "5550000001", "zed@x.com")
            .unwrap();
        manager
            .add_contact("Amy", "Zane", "5550000002", "amy@x.com")
            .unwrap();

        let names: Vec<_> = manager
            .list_contacts()
            .unwrap()
            .iter()
            .map(|c| c.first_name.as_str())
            .collect();
        assert_eq!(names, ["Zed", "Amy"]);
    }

    #[test]
    fn test_search_empty_collection() {
        let (_dir, manager) = create_test_manager();
        assert!(manager.search_contact("ana").is_empty());
    }

    #[test]
    fn test_search_contact() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Bob", "Stone", "5550000000", "bob@y.org")
            .unwrap();

        let results = manager.search_contact("ana");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].first_name, "Ana");

        assert_eq!(manager.search_contact("STONE").len(), 1);
        assert!(manager.search_contact("nobody").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Bob", "Stone", "5550000000", "bob@y.org")
            .unwrap();

        assert_eq!(manager.search_contact("").len(), 2);
    }

    #[test]
    fn test_modify_contact() {
        let (dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let update = ContactUpdate::new().phone_number("5559999999");
        let updated = manager.modify_contact("ana", None, &update).unwrap();

        assert_eq!(updated.phone_number, "5559999999");
        assert_eq!(updated.email, "ana@x.com");

        let reopened = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        assert_eq!(
            reopened.list_contacts().unwrap()[0].phone_number,
            "5559999999"
        );
    }

    #[test]
    fn test_modify_blank_fields_keep_values() {
        let (_dir, mut manager) = create_test_manager();
        let original = add_ana(&mut manager);

        let update = ContactUpdate::new().first_name("  ").email("");
        assert!(update.is_empty());
        let updated = manager.modify_contact("ana", None, &update).unwrap();
        assert_eq!(updated, original);
    }

    #[test]
    fn test_modify_not_found() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let err = manager
            .modify_contact("zed", None, &ContactUpdate::new())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_modify_invalid_value_rejected() {
        let (_dir, mut manager) = create_test_manager();
        let original = add_ana(&mut manager);

        let update = ContactUpdate::new().phone_number("555");
        let err = manager.modify_contact("ana", None, &update).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(manager.list_contacts().unwrap()[0], original);
    }

    #[test]
    fn test_modify_ambiguous_returns_candidates() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Ana", "Cruz", "5550000000", "cruz@x.com")
            .unwrap();

        let err = manager
            .modify_contact("ana", None, &ContactUpdate::new().first_name("Anna"))
            .unwrap_err();
        match err {
            Error::Ambiguous { candidates } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[1].last_name, "Cruz");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_modify_with_selection() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Ana", "Cruz", "5550000000", "cruz@x.com")
            .unwrap();

        let updated = manager
            .modify_contact("ana", Some(2), &ContactUpdate::new().first_name("Anna"))
            .unwrap();
        assert_eq!(updated.full_name(), "Anna Cruz");
        assert_eq!(manager.list_contacts().unwrap()[1], updated);
    }

    #[test]
    fn test_invalid_selection() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Ana", "Cruz", "5550000000", "cruz@x.com")
            .unwrap();

        for index in [0, 3] {
            let err = manager
                .modify_contact("ana", Some(index), &ContactUpdate::new())
                .unwrap_err();
            assert!(matches!(err, Error::Selection { count: 2, .. }));
        }
        let err = manager.delete_contact("ana", Some(7)).unwrap_err();
        assert!(matches!(err, Error::Selection { index: 7, count: 2 }));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_modify_into_duplicate_rejected() {
        let (_dir, mut manager) = create_test_manager();
        let first = add_ana(&mut manager);
        let second = manager
            .add_contact("Ana", "Lee", "5550000000", "other@x.com")
            .unwrap();

        let update = ContactUpdate::new().phone_number("5551234567");
        let err = manager.modify_contact("ana", Some(2), &update).unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(manager.list_contacts().unwrap(), [first, second]);
    }

    #[test]
    fn test_modify_does_not_collide_with_itself() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let update = ContactUpdate::new().first_name("ANA");
        let updated = manager.modify_contact("ana", None, &update).unwrap();
        assert_eq!(updated.first_name, "ANA");
    }

    #[test]
    fn test_modify_duplicate_allowed_when_forced() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);
        manager
            .add_contact("Ana", "Lee", "5550000000", "other@x.com")
            .unwrap();

        let update = ContactUpdate::new().phone_number("5551234567");
        manager
            .modify_contact_with("ana", Some(2), &update, DuplicatePolicy::Allow)
            .unwrap();
        assert_eq!(manager.list_contacts().unwrap()[1].phone_number, "5551234567");
    }

    #[test]
    fn test_delete_contact_keeps_others_in_order() {
        let (_dir, mut manager) = create_test_manager();
        manager
            .add_contact("Amy", "Adams", "5550000001", "amy@x.com")
            .unwrap();
        manager
            .add_contact("Bob", "Brown", "5550000002", "bob@x.com")
            .unwrap();
        manager
            .add_contact("Cat", "Cole", "5550000003", "cat@x.com")
            .unwrap();

        let removed = manager.delete_contact("bob", None).unwrap();
        assert_eq!(removed.first_name, "Bob");

        let names: Vec<_> = manager
            .list_contacts()
            .unwrap()
            .iter()
            .map(|c| c.first_name.as_str())
            .collect();
        assert_eq!(names, ["Amy", "Cat"]);
    }

    #[test]
    fn test_delete_not_found() {
        let (_dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let err = manager.delete_contact("zed", None).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_delete_on_empty_book() {
        let (_dir, mut manager) = create_test_manager();
        let err = manager.delete_contact("ana", None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let (dir, mut manager) = create_test_manager();
        manager
            .add_contact("Zed", "Adams", "5550000001", "zed@x.com")
            .unwrap();
        add_ana(&mut manager);
        manager
            .add_contact("Mia", "Jean-Paul", "5550000003", "mia@x.com")
            .unwrap();
        let before = manager.list_contacts().unwrap().to_vec();

        let reopened = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        assert_eq!(reopened.list_contacts().unwrap(), before.as_slice());
    }

    #[test]
    fn test_save_failure_keeps_memory_and_can_retry() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("book");
        let path = blocker.join("contacts.json");
        let mut manager = ContactManager::open(&path).unwrap();

        // A plain file where the store's directory should be.
        std::fs::write(&blocker, "").unwrap();
        let err = manager
            .add_contact("Ana", "Lee", "5551234567", "ana@x.com")
            .unwrap_err();
        assert!(err.is_store_error());
        assert_eq!(manager.len(), 1);

        std::fs::remove_file(&blocker).unwrap();
        std::fs::create_dir(&blocker).unwrap();
        manager.save_contacts().unwrap();

        let reopened = ContactManager::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_add_reports_persistence_when_store_dir_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        let path = file.join("sub").join("contacts.json");
        let mut manager = ContactManager::open(&path).unwrap();

        std::fs::write(&file, "").unwrap();
        let err = manager
            .add_contact("Ana", "Lee", "5551234567", "ana@x.com")
            .unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert!(err.is_store_error());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_scenario() {
        let (dir, mut manager) = create_test_manager();

        add_ana(&mut manager);
        assert_eq!(manager.len(), 1);

        let err = manager
            .add_contact("Ana", "Lee", "5551234567", "ana@x.com")
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(manager.len(), 1);

        let found = manager.search_contact("ana");
        assert_eq!(found.len(), 1);

        let update = ContactUpdate::new().phone_number("5559999999");
        manager.modify_contact("ana", None, &update).unwrap();
        assert_eq!(manager.len(), 1);
        let reopened = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        assert_eq!(
            reopened.search_contact("ana")[0].phone_number,
            "5559999999"
        );

        manager.delete_contact("Ana Lee", None).unwrap();
        assert_eq!(manager.len(), 0);
        let reopened = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_load_contacts_reloads_from_store() {
        let (dir, mut manager) = create_test_manager();
        add_ana(&mut manager);

        let mut other = ContactManager::open(dir.path().join("contacts.json")).unwrap();
        other
            .add_contact("Bob", "Stone", "5550000000", "bob@y.org")
            .unwrap();

        manager.load_contacts().unwrap();
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_contact_update_apply() {
        let current = Contact::new("Ana", "Lee", "5551234567", "ana@x.com");
        let update = ContactUpdate::new().last_name(" Park ").email("ana@park.io");
        let next = update.apply(&current);
        assert_eq!(next, Contact::new("Ana", "Park", "5551234567", "ana@park.io"));
    }

    #[test]
    fn test_store_path() {
        let (dir, manager) = create_test_manager();
        assert_eq!(manager.store_path(), dir.path().join("contacts.json"));
    }
}
