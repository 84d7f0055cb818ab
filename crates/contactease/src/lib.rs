//! `contactease` - A personal contact address book
//!
//! This library keeps an ordered list of validated contacts (first name,
//! last name, phone number, email) and persists it to a flat JSON file after
//! every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod manager;
pub mod store;
pub mod validation;

pub use config::Config;
pub use contact::Contact;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use manager::{ContactManager, ContactUpdate, DuplicatePolicy};
pub use store::ContactStore;
pub use validation::{valid_email, valid_name, valid_phone, Field};
