//! Command-line interface for contactease.
//!
//! This module provides the CLI structure and output rendering for the
//! `contacts` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    duplicate_policy, AddCommand, ConfigCommand, DeleteCommand, ListCommand, ModifyCommand,
    OutputFormat, SearchCommand,
};

/// contacts - A personal address book
///
/// Add, view, modify, delete and search contacts kept in a local JSON file.
#[derive(Debug, Parser)]
#[command(name = "contacts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the contacts file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new contact
    Add(AddCommand),

    /// List all contacts
    List(ListCommand),

    /// Search contacts by name
    Search(SearchCommand),

    /// Modify an existing contact
    Modify(ModifyCommand),

    /// Delete a contact
    Delete(DeleteCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
