//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::manager::{ContactUpdate, DuplicatePolicy};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// First name (letters, spaces, hyphens)
    pub first_name: String,

    /// Last name (letters, spaces, hyphens)
    pub last_name: String,

    /// Phone number (exactly 10 digits)
    pub phone_number: String,

    /// Email address
    pub email: String,

    /// Add the contact even if it duplicates an existing one
    #[arg(short, long)]
    pub force: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Sort by first then last name
    #[arg(long, conflicts_with = "unsorted")]
    pub sorted: bool,

    /// Keep insertion order
    #[arg(long)]
    pub unsorted: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ListCommand {
    /// Resolve the sort flags against the configured default.
    #[must_use]
    pub fn sort_by_name(&self, default: bool) -> bool {
        if self.sorted {
            true
        } else if self.unsorted {
            false
        } else {
            default
        }
    }
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Text to look for in first, last or full names
    pub query: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Modify command arguments.
#[derive(Debug, Args)]
pub struct ModifyCommand {
    /// Name (or part of one) of the contact to modify
    pub query: String,

    /// Which match to modify when several contacts match (1-based)
    #[arg(short, long, value_name = "N")]
    pub select: Option<usize>,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// Apply the change even if it duplicates another contact
    #[arg(short, long)]
    pub force: bool,
}

impl ModifyCommand {
    /// The field changes requested on the command line.
    #[must_use]
    pub fn update(&self) -> ContactUpdate {
        ContactUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Name (or part of one) of the contact to delete
    pub query: String,

    /// Which match to delete when several contacts match (1-based)
    #[arg(short, long, value_name = "N")]
    pub select: Option<usize>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per contact
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Map a `--force` flag to a duplicate policy.
#[must_use]
pub fn duplicate_policy(force: bool) -> DuplicatePolicy {
    if force {
        DuplicatePolicy::Allow
    } else {
        DuplicatePolicy::Reject
    }
}
