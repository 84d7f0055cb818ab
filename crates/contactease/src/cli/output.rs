//! Rendering contacts for the terminal.

use std::fmt::Write;

use crate::contact::{Contact, FIELD_HEADERS};
use crate::error::Result;

use super::OutputFormat;

/// Render contacts in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_contacts(contacts: &[Contact], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(contacts)),
        OutputFormat::Table => Ok(render_table(contacts)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(contacts)?),
    }
}

/// One human-readable line per contact.
#[must_use]
pub fn render_plain(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        let _ = writeln!(out, "{contact}");
    }
    out
}

/// A bordered grid with a header row.
#[must_use]
pub fn render_table(contacts: &[Contact]) -> String {
    let mut widths = FIELD_HEADERS.map(|h| h.chars().count());
    for contact in contacts {
        for (width, value) in widths.iter_mut().zip(contact.fields()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_rule(&mut out, &widths, '-');
    push_row(&mut out, &widths, FIELD_HEADERS);
    push_rule(&mut out, &widths, '=');
    for contact in contacts {
        push_row(&mut out, &widths, contact.fields());
        push_rule(&mut out, &widths, '-');
    }
    out
}

/// Numbered candidate list used to ask for a selection.
#[must_use]
pub fn render_candidates(candidates: &[Contact]) -> String {
    let mut out = String::new();
    for (i, contact) in candidates.iter().enumerate() {
        let _ = writeln!(out, "{}: {contact}", i + 1);
    }
    out
}

/// Sort by first name, then last name, ignoring case.
pub fn sort_by_name(contacts: &mut [Contact]) {
    contacts.sort_by_cached_key(|c| (c.first_name.to_lowercase(), c.last_name.to_lowercase()));
}

fn push_rule(out: &mut String, widths: &[usize; 4], fill: char) {
    out.push('+');
    for width in widths {
        out.extend(std::iter::repeat(fill).take(width + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_row(out: &mut String, widths: &[usize; 4], cells: [&str; 4]) {
    out.push('|');
    for (width, cell) in widths.iter().zip(cells) {
        let pad = width - cell.chars().count();
        let _ = write!(out, " {cell}{} |", " ".repeat(pad));
    }
    out.push('\n');
}
