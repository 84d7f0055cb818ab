//! `contacts` - CLI for contactease
//!
//! This binary is a thin front end over [`ContactManager`]: it parses the
//! command line, runs one operation and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::{anyhow, Context};
use clap::Parser;

use contactease::cli::output::{render_candidates, render_contacts, sort_by_name};
use contactease::cli::{
    duplicate_policy, AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand,
    ModifyCommand, SearchCommand,
};
use contactease::{init_logging, Config, ContactManager, Error};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())
        .context("loading configuration")?
        .with_contacts_path(cli.store);

    let path = config.contacts_path();

    match cli.command {
        Command::Add(cmd) => handle_add(&mut open_manager(&path)?, &cmd),
        Command::List(cmd) => handle_list(&open_manager(&path)?, &config, &cmd),
        Command::Search(cmd) => handle_search(&open_manager(&path)?, &config, &cmd),
        Command::Modify(cmd) => handle_modify(&mut open_manager(&path)?, &cmd),
        Command::Delete(cmd) => handle_delete(&mut open_manager(&path)?, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_manager(path: &Path) -> anyhow::Result<ContactManager> {
    ContactManager::open(path).with_context(|| format!("opening address book {}", path.display()))
}

/// Turn a manager error into a message for the user.
fn explain(err: Error) -> anyhow::Error {
    match err {
        Error::Ambiguous { candidates } => {
            eprint!("{}", render_candidates(&candidates));
            anyhow!(
                "{} contacts match; re-run with --select N to choose one",
                candidates.len()
            )
        }
        Error::Duplicate { existing } => {
            anyhow!("contact already exists: {existing}. Use --force to store it anyway")
        }
        err @ Error::Persistence { .. } => {
            anyhow::Error::new(err).context("the change was not saved")
        }
        err => err.into(),
    }
}

fn handle_add(manager: &mut ContactManager, cmd: &AddCommand) -> anyhow::Result<()> {
    let contact = manager
        .add_contact_with(
            &cmd.first_name,
            &cmd.last_name,
            &cmd.phone_number,
            &cmd.email,
            duplicate_policy(cmd.force),
        )
        .map_err(explain)?;
    println!("Contact added successfully: {contact}");
    Ok(())
}

fn handle_list(
    manager: &ContactManager,
    config: &Config,
    cmd: &ListCommand,
) -> anyhow::Result<()> {
    let mut contacts = match manager.list_contacts() {
        Ok(contacts) => contacts.to_vec(),
        Err(Error::NoContacts) => {
            println!("No contacts available. Please, enter one.");
            return Ok(());
        }
        Err(err) => return Err(explain(err)),
    };

    if cmd.sort_by_name(config.display.sort_by_name) {
        sort_by_name(&mut contacts);
    }
    let format = cmd.format.unwrap_or(config.display.format);
    print!("{}", render_contacts(&contacts, format)?);
    Ok(())
}

fn handle_search(
    manager: &ContactManager,
    config: &Config,
    cmd: &SearchCommand,
) -> anyhow::Result<()> {
    let results = manager.search_contact(&cmd.query);
    if results.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }

    let format = cmd.format.unwrap_or(config.display.format);
    print!("{}", render_contacts(&results, format)?);
    Ok(())
}

fn handle_modify(manager: &mut ContactManager, cmd: &ModifyCommand) -> anyhow::Result<()> {
    let update = cmd.update();
    if update.is_empty() {
        println!("Nothing to change. Pass at least one of --first-name, --last-name, --phone or --email.");
        return Ok(());
    }

    let contact = manager
        .modify_contact_with(&cmd.query, cmd.select, &update, duplicate_policy(cmd.force))
        .map_err(explain)?;
    println!("Contact modified successfully: {contact}");
    Ok(())
}

fn handle_delete(manager: &mut ContactManager, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let contact = manager
        .delete_contact(&cmd.query, cmd.select)
        .map_err(explain)?;
    println!("Contact deleted successfully: {contact}");
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Contacts file:      {}", config.contacts_path().display());
                println!();
                println!("[Display]");
                println!("  Sort by name:       {}", config.display.sort_by_name);
                println!("  Format:             {:?}", config.display.format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
