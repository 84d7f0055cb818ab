//! Flat-file storage for the address book.
//!
//! The store is a single JSON document holding an ordered array of contact
//! objects. Saves never write the target in place: the new contents go to a
//! temporary file in the same directory which is then renamed over the old
//! one, so an interrupted save leaves the previous file intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::validation::validate_contact;

/// JSON file backing a [`ContactManager`](crate::manager::ContactManager).
#[derive(Debug, Clone)]
pub struct ContactStore {
    /// Path to the store file.
    path: PathBuf,
}

impl ContactStore {
    /// Create a store handle for the given path. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every contact from the store, in stored order.
    ///
    /// A missing file, or one holding only whitespace, is an empty address
    /// book.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the file is not a JSON array of
    /// contacts or holds a record that fails validation, and [`Error::Io`]
    /// if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Contact>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No contacts file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            debug!("Contacts file {} is empty", self.path.display());
            return Ok(Vec::new());
        }

        let contacts: Vec<Contact> = serde_json::from_str(&raw)
            .map_err(|e| Error::corrupt_store(&self.path, e.to_string()))?;

        for (i, contact) in contacts.iter().enumerate() {
            validate_contact(contact).map_err(|e| {
                Error::corrupt_store(&self.path, format!("record {}: {e}", i + 1))
            })?;
        }

        debug!(
            "Loaded {} contacts from {}",
            contacts.len(),
            self.path.display()
        );
        Ok(contacts)
    }

    /// Replace the store contents with the given contacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the parent directory cannot be
    /// created or if writing or renaming fails. The previous file is left as
    /// it was.
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Persistence {
                path: self.path.clone(),
                source,
            })?;
        }

        let body = serde_json::to_vec_pretty(contacts)?;
        self.write_atomic(parent, &body)
            .map_err(|source| Error::Persistence {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved {} contacts to {}", contacts.len(), self.path.display());
        Ok(())
    }

    fn write_atomic(&self, dir: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
